//! Scoped disposal
//!
//! A `Scope` collects the release action of every animation, observer and
//! listener created while a view is being set up. Disposing the scope runs
//! those actions in reverse registration order, so later registrations are
//! released before the ones they were layered on top of.

/// Release action run against the owning context
pub type Disposer<C> = Box<dyn FnOnce(&mut C)>;

/// An explicit disposal list owned by one mount
pub struct Scope<C> {
    name: String,
    disposers: Vec<(&'static str, Disposer<C>)>,
}

impl<C> Scope<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disposers: Vec::new(),
        }
    }

    /// Scope name (used in logs)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a release action
    pub fn defer<F>(&mut self, label: &'static str, release: F)
    where
        F: FnOnce(&mut C) + 'static,
    {
        self.disposers.push((label, Box::new(release)));
    }

    /// Move every pending release action of `child` into this scope
    pub fn adopt(&mut self, mut child: Scope<C>) {
        self.disposers.append(&mut child.disposers);
    }

    /// Number of pending release actions
    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Release everything, newest first. Returns the number of actions run.
    pub fn dispose(mut self, ctx: &mut C) -> usize {
        let disposers = std::mem::take(&mut self.disposers);
        let count = disposers.len();
        for (label, release) in disposers.into_iter().rev() {
            tracing::trace!(scope = %self.name, label, "releasing");
            release(ctx);
        }
        tracing::debug!(scope = %self.name, released = count, "scope disposed");
        count
    }
}

impl<C> Drop for Scope<C> {
    fn drop(&mut self) {
        if !self.disposers.is_empty() {
            tracing::warn!(
                scope = %self.name,
                pending = self.disposers.len(),
                "scope dropped without dispose, registrations leaked"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispose_runs_in_reverse_order() {
        let mut scope: Scope<Vec<u32>> = Scope::new("order");
        for i in 0..4 {
            scope.defer("push", move |log| log.push(i));
        }

        let mut log = Vec::new();
        assert_eq!(scope.dispose(&mut log), 4);
        assert_eq!(log, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_adopt_keeps_child_after_parent_entries() {
        let mut parent: Scope<Vec<&'static str>> = Scope::new("parent");
        parent.defer("a", |log| log.push("parent"));

        let mut child = Scope::new("child");
        child.defer("b", |log: &mut Vec<&'static str>| log.push("child"));
        parent.adopt(child);

        assert_eq!(parent.len(), 2);
        let mut log = Vec::new();
        parent.dispose(&mut log);
        assert_eq!(log, vec!["child", "parent"]);
    }

    #[test]
    fn test_empty_scope_disposes_nothing() {
        let scope: Scope<()> = Scope::new("empty");
        assert!(scope.is_empty());
        assert_eq!(scope.dispose(&mut ()), 0);
    }
}
