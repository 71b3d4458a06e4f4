use trestle_core::dispose::{dispose_subtree, DisposeHooks};
use trestle_core::{DisposeReport, LayoutParticipant, NodeFlags, NodeId, TreeError, TreeResult};

use crate::{TreeObserver, Widget, WidgetTree};

struct WidgetDisposeHooks<'a> {
    observers: &'a mut [Box<dyn TreeObserver>],
}

impl DisposeHooks<Widget> for WidgetDisposeHooks<'_> {
    fn dispose_sent(&mut self, id: NodeId, _widget: &mut Widget) {
        for observer in self.observers.iter_mut() {
            observer.dispose_sent(id);
        }
    }

    fn detached(&mut self, parent: NodeId, child: NodeId) {
        for observer in self.observers.iter_mut() {
            observer.child_removed(parent, child);
        }
    }

    fn release(&mut self, id: NodeId, widget: &mut Widget) -> TreeResult<()> {
        if let Some(hook) = widget.capabilities.release_mut() {
            hook.release(id)
                .map_err(|message| TreeError::ReleaseFailed { node: id, message })?;
        }
        widget.capabilities.clear();
        widget.intrinsic = None;
        Ok(())
    }
}

impl WidgetTree {
    /// Disposes `id` and its whole subtree, children first.
    ///
    /// Disposing a disposed node does nothing. When a release hook fails the
    /// teardown stops there: nodes released so far stay disposed, the failing
    /// node and everything not yet visited are left in dispose. A subtree root
    /// that was already unlinked when its own hook failed still gives its
    /// parent a layout pass.
    pub fn dispose(&mut self, id: NodeId) -> TreeResult<DisposeReport> {
        self.check_thread()?;
        let parent = self.arena.parent(id)?;
        let WidgetTree {
            arena, observers, ..
        } = self;
        let mut hooks = WidgetDisposeHooks {
            observers: observers.as_mut_slice(),
        };
        let report = match dispose_subtree(arena, id, &mut hooks) {
            Ok(report) => report,
            Err(err) => {
                if let Some(parent) = parent {
                    if self.arena.parent(id)?.is_none() {
                        self.relayout_after_removal(parent, id)?;
                    }
                }
                return Err(err);
            }
        };

        self.deferred_layouts
            .retain(|queued| !report.disposed.contains(queued));
        if let Some(parent) = report.detached_from {
            self.relayout_after_removal(parent, id)?;
        }
        Ok(report)
    }

    fn relayout_after_removal(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let Ok(node) = self.arena.live_mut(parent) else {
            return Ok(());
        };
        node.value_mut().flush_cache(child);
        node.insert_flags(NodeFlags::LAYOUT_NEEDED);
        self.update_layout(parent, false)
    }
}

#[cfg(test)]
#[path = "tests/dispose_tests.rs"]
mod tests;
