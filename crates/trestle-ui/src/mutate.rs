use std::rc::Rc;

use trestle_core::{dirty, NodeFlags, NodeId, PreconditionViolation, TreeResult};
use trestle_geometry::{Point, Rect, Size};
use trestle_layout::LayoutStrategy;

use crate::{ContainerSpec, ContentMeasurer, LeafSpec, WidgetTree};

impl WidgetTree {
    /// Creates a container without a parent.
    pub fn create_root(&mut self, spec: ContainerSpec) -> TreeResult<NodeId> {
        self.check_thread()?;
        let id = self.arena.insert(spec.build(), None)?;
        log::trace!("created root node {id}");
        Ok(id)
    }

    /// Appends a new container to `parent`.
    pub fn create_container(&mut self, parent: NodeId, spec: ContainerSpec) -> TreeResult<NodeId> {
        self.check_thread()?;
        self.require_container(parent)?;
        let id = self.arena.insert(spec.build(), Some(parent))?;
        self.child_added(parent, id)?;
        Ok(id)
    }

    /// Appends a new leaf to `parent`.
    pub fn create_leaf(&mut self, parent: NodeId, spec: LeafSpec) -> TreeResult<NodeId> {
        self.check_thread()?;
        self.require_container(parent)?;
        let id = self.arena.insert(spec.build(), Some(parent))?;
        self.child_added(parent, id)?;
        Ok(id)
    }

    fn child_added(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        log::trace!("node {child} added to node {parent}");
        self.notify(|observer| observer.child_added(parent, child));
        dirty::mark_structure_changed(&mut self.arena, parent)?;
        self.update_layout(parent, false)
    }

    /// Reports that the content of `id` changed its intrinsic size.
    ///
    /// With `flush`, the parent's cached size for `id` is dropped and the
    /// parent re-measures it.
    pub fn content_changed(&mut self, id: NodeId, flush: bool) -> TreeResult<()> {
        self.check_thread()?;
        let parent = dirty::mark_content_changed(&mut self.arena, id, flush)?;
        self.update_after_content_change(id, parent)
    }

    /// Lays out whatever a content mark on `id` left pending: the parent, or
    /// a marked root container itself.
    fn update_after_content_change(&mut self, id: NodeId, parent: Option<NodeId>) -> TreeResult<()> {
        if let Some(parent) = parent {
            return self.update_layout(parent, false);
        }
        let node = self.arena.live(id)?;
        if node.parent().is_none()
            && node.value().is_container()
            && node.flags().is_layout_needed()
        {
            self.update_layout(id, false)?;
        }
        Ok(())
    }

    /// Replaces the content measurer of `id` and re-lays out its parent.
    ///
    /// Containers keep the measurer but never consult it.
    pub fn set_content(&mut self, id: NodeId, content: Rc<dyn ContentMeasurer>) -> TreeResult<()> {
        self.check_thread()?;
        self.widget_mut(id)?.capabilities.set_content(Some(content));
        self.content_changed(id, true)
    }

    /// Shows or hides `id`. Hidden nodes take no part in their parent's layout.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> TreeResult<()> {
        self.check_thread()?;
        if self.widget(id)?.visible == visible {
            return Ok(());
        }
        let parent = if visible {
            self.widget_mut(id)?.visible = true;
            dirty::mark_content_changed(&mut self.arena, id, true)?
        } else {
            let parent = dirty::mark_content_changed(&mut self.arena, id, true)?;
            self.widget_mut(id)?.visible = false;
            parent
        };
        self.update_after_content_change(id, parent)
    }

    /// Installs a new strategy on a container and returns the old one.
    pub fn set_layout(
        &mut self,
        id: NodeId,
        layout: Option<Box<dyn LayoutStrategy>>,
    ) -> TreeResult<Option<Box<dyn LayoutStrategy>>> {
        self.check_thread()?;
        self.require_container(id)?;
        let previous = self.widget_mut(id)?.capabilities.set_layout(layout);
        self.arena.insert_flags(id, NodeFlags::LAYOUT_DIRTY)?;
        self.update_layout(id, false)?;
        Ok(previous)
    }

    /// Moves and resizes `id` directly.
    ///
    /// A container only lays itself out again when its size changed or it was
    /// already marked.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> TreeResult<()> {
        self.check_thread()?;
        self.assign_bounds(id, bounds)?;
        let node = self.arena.live(id)?;
        if node.value().is_container() && node.flags().is_layout_needed() {
            self.update_layout(id, false)?;
        }
        Ok(())
    }

    pub fn set_size(&mut self, id: NodeId, size: Size) -> TreeResult<()> {
        self.check_thread()?;
        let origin = self.widget(id)?.bounds.origin();
        self.set_bounds(id, Rect::from_origin_size(origin, size))
    }

    pub fn set_location(&mut self, id: NodeId, location: Point) -> TreeResult<()> {
        self.check_thread()?;
        let size = self.widget(id)?.bounds.size();
        self.set_bounds(id, Rect::from_origin_size(location, size))
    }

    /// Resolves the style trim of `id` again (of the whole subtree with `all`)
    /// and re-lays out what depends on it.
    pub fn reskin(&mut self, id: NodeId, all: bool) -> TreeResult<()> {
        self.check_thread()?;
        self.arena.live(id)?;
        let targets = if all {
            self.arena.pre_order(id)?
        } else {
            vec![id]
        };
        for &target in &targets {
            if self.arena.flags(target)?.is_in_dispose() {
                continue;
            }
            self.arena.insert_flags(target, NodeFlags::SKIN_NEEDED)?;
            dirty::mark_content_changed(&mut self.arena, target, true)?;
        }
        let top = self.arena.parent(id)?.unwrap_or(id);
        self.update_layout(top, all)
    }

    /// Moves `id` right after `other` in paint order, or to the end.
    pub fn move_above(&mut self, id: NodeId, other: Option<NodeId>) -> TreeResult<()> {
        self.reorder(id, other, true)
    }

    /// Moves `id` right before `other` in paint order, or to the front.
    pub fn move_below(&mut self, id: NodeId, other: Option<NodeId>) -> TreeResult<()> {
        self.reorder(id, other, false)
    }

    fn reorder(&mut self, id: NodeId, other: Option<NodeId>, above: bool) -> TreeResult<()> {
        self.check_thread()?;
        self.arena.live(id)?;
        let Some(parent) = self.arena.parent(id)? else {
            return Ok(());
        };
        let from = self
            .arena
            .index_in_parent(id)?
            .ok_or(PreconditionViolation::NotSiblings { node: id, other: parent })?;
        let last = self.arena.get(parent)?.children().len() - 1;
        let to = match other {
            None if above => last,
            None => 0,
            Some(other) => {
                self.arena.live(other)?;
                if other == id {
                    return Ok(());
                }
                if self.arena.parent(other)? != Some(parent) {
                    return Err(PreconditionViolation::NotSiblings { node: id, other }.into());
                }
                let target = self
                    .arena
                    .index_in_parent(other)?
                    .ok_or(PreconditionViolation::NotSiblings { node: id, other })?;
                match (above, from < target) {
                    (true, true) => target,
                    (true, false) => target + 1,
                    (false, true) => target - 1,
                    (false, false) => target,
                }
            }
        };
        if from == to {
            return Ok(());
        }
        self.arena.move_child(parent, from, to)?;
        dirty::mark_structure_changed(&mut self.arena, parent)?;
        self.update_layout(parent, false)
    }

    /// Moves `id` to the end of `new_parent`'s children.
    pub fn set_parent(&mut self, id: NodeId, new_parent: NodeId) -> TreeResult<()> {
        self.check_thread()?;
        self.arena.live(id)?;
        self.require_container(new_parent)?;
        if id == new_parent || self.arena.is_ancestor(id, new_parent) {
            return Err(PreconditionViolation::Cycle {
                node: id,
                new_parent,
            }
            .into());
        }
        let old_parent = self.arena.parent(id)?;
        if old_parent == Some(new_parent) {
            return Ok(());
        }

        if let Some(old) = old_parent {
            if let Some(layout) = self.widget_mut(old)?.capabilities.layout_mut() {
                layout.flush_cache(id);
            }
        }
        self.arena.attach(new_parent, id, None)?;
        if let Some(old) = old_parent {
            self.notify(|observer| observer.child_removed(old, id));
            dirty::mark_structure_changed(&mut self.arena, old)?;
            self.update_layout(old, false)?;
        }
        self.child_added(new_parent, id)
    }
}

#[cfg(test)]
#[path = "tests/mutate_tests.rs"]
mod tests;
