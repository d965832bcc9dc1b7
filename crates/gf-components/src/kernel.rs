//! Ownership of the opaque numerical kernel behind a component.

use core::fmt;

use gf_core::{GfError, GfResult, KernelResult};

/// Owns a component's kernel and mediates every call into it.
///
/// The kernel is created by `factory` only when [`bind`](Self::bind) runs,
/// and kept only if every configuration call succeeded.
pub struct KernelBinding<K: ?Sized> {
    factory: Box<dyn Fn() -> Box<K>>,
    handle: Option<Box<K>>,
}

impl<K: ?Sized> KernelBinding<K> {
    pub fn new(factory: impl Fn() -> Box<K> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            handle: None,
        }
    }

    /// Construct the kernel and let `push` feed it the validated
    /// configuration, in order, ending with its ready signal.
    pub fn bind(
        &mut self,
        component: &str,
        push: impl FnOnce(&mut K) -> KernelResult<()>,
    ) -> GfResult<()> {
        if self.handle.is_some() {
            return Err(GfError::Invariant {
                what: format!("kernel of '{}' is already bound", component),
            });
        }
        let mut kernel = (self.factory)();
        push(kernel.as_mut()).map_err(|e| GfError::kernel(component, e))?;
        self.handle = Some(kernel);
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    pub fn get(&self, component: &str) -> GfResult<&K> {
        self.handle.as_deref().ok_or_else(|| unbound(component))
    }

    pub fn get_mut(&mut self, component: &str) -> GfResult<&mut K> {
        self.handle.as_deref_mut().ok_or_else(|| unbound(component))
    }

    /// Drop the kernel. Returns whether one was bound.
    pub fn release(&mut self) -> bool {
        self.handle.take().is_some()
    }
}

fn unbound(component: &str) -> GfError {
    GfError::Invariant {
        what: format!("kernel of '{}' is not bound", component),
    }
}

impl<K: ?Sized> fmt::Debug for KernelBinding<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelBinding")
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::KernelError;

    trait Echo {
        fn set(&mut self, v: u32) -> KernelResult<()>;
        fn value(&self) -> u32;
    }

    #[derive(Default)]
    struct EchoKernel(u32);

    impl Echo for EchoKernel {
        fn set(&mut self, v: u32) -> KernelResult<()> {
            if v == 0 {
                return Err(KernelError::new("zero rejected"));
            }
            self.0 = v;
            Ok(())
        }

        fn value(&self) -> u32 {
            self.0
        }
    }

    fn binding() -> KernelBinding<dyn Echo> {
        KernelBinding::new(|| Box::new(EchoKernel::default()) as Box<dyn Echo>)
    }

    #[test]
    fn bind_keeps_kernel_on_success() {
        let mut b = binding();
        assert!(!b.is_bound());
        b.bind("echo", |k| k.set(7)).unwrap();
        assert_eq!(b.get("echo").unwrap().value(), 7);
        assert!(b.release());
        assert!(!b.release());
    }

    #[test]
    fn rejected_configuration_leaves_nothing_bound() {
        let mut b = binding();
        let err = b.bind("echo", |k| k.set(0)).unwrap_err();
        assert!(matches!(err, GfError::KernelBinding { ref message, .. } if message == "zero rejected"));
        assert!(!b.is_bound());
        assert!(b.get("echo").is_err());
    }

    #[test]
    fn second_bind_refused() {
        let mut b = binding();
        b.bind("echo", |k| k.set(1)).unwrap();
        assert!(b.bind("echo", |k| k.set(2)).is_err());
        assert_eq!(b.get("echo").unwrap().value(), 1);
    }
}
