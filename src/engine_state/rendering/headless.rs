//! An in-memory renderer.
//!
//! `HeadlessRenderer` keeps the scene as plain maps so the simulation can run
//! without a window: the scripted binary uses it, and tests use it to check
//! that every visual is released exactly once.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::{GroupHandle, Renderer, VisualHandle, VisualInstance};

/// What the headless scene knows about one live visual.
#[derive(Clone, Debug)]
pub struct VisualRecord {
    /// Instance data the visual was created from
    pub instance: VisualInstance,
    /// Group the visual is attached to, if any
    pub group: Option<GroupHandle>,
    /// Current cosmetic scale
    pub scale: f32,
}

/// A [`Renderer`] that draws nothing and remembers everything.
#[derive(Default, Debug)]
pub struct HeadlessRenderer {
    next_handle: u64,
    groups: HashSet<GroupHandle>,
    visuals: HashMap<VisualHandle, VisualRecord>,
    released_visuals: u64,
    invalid_releases: u64,
}

impl HeadlessRenderer {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups currently in the scene.
    pub fn live_groups(&self) -> usize {
        self.groups.len()
    }

    /// Number of visuals created and not yet released.
    pub fn live_visuals(&self) -> usize {
        self.visuals.len()
    }

    /// Number of live visuals attached to `group`.
    pub fn visuals_in_group(&self, group: GroupHandle) -> usize {
        self.visuals
            .values()
            .filter(|record| record.group == Some(group))
            .count()
    }

    /// Looks up a live visual.
    pub fn visual(&self, visual: VisualHandle) -> Option<&VisualRecord> {
        self.visuals.get(&visual)
    }

    /// Total number of successful visual releases.
    pub fn released_visuals(&self) -> u64 {
        self.released_visuals
    }

    /// Releases of handles that were already released or never created.
    ///
    /// Anything other than zero means a lifetime bug in the caller.
    pub fn invalid_releases(&self) -> u64 {
        self.invalid_releases
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Renderer for HeadlessRenderer {
    fn create_group(&mut self) -> GroupHandle {
        let group = GroupHandle(self.next());
        self.groups.insert(group);
        group
    }

    fn release_group(&mut self, group: GroupHandle) {
        if !self.groups.remove(&group) {
            warn!("release of unknown group {:?}", group);
            return;
        }
        for record in self.visuals.values_mut() {
            if record.group == Some(group) {
                record.group = None;
            }
        }
    }

    fn create_visual(&mut self, instance: &VisualInstance) -> VisualHandle {
        let visual = VisualHandle(self.next());
        self.visuals.insert(
            visual,
            VisualRecord {
                instance: *instance,
                group: None,
                scale: 1.0,
            },
        );
        visual
    }

    fn attach_visual(&mut self, group: GroupHandle, visual: VisualHandle) {
        match self.visuals.get_mut(&visual) {
            Some(record) => record.group = Some(group),
            None => warn!("attach of unknown visual {:?}", visual),
        }
    }

    fn detach_visual(&mut self, group: GroupHandle, visual: VisualHandle) {
        if let Some(record) = self.visuals.get_mut(&visual) {
            if record.group == Some(group) {
                record.group = None;
            }
        }
    }

    fn release_visual(&mut self, visual: VisualHandle) {
        if self.visuals.remove(&visual).is_some() {
            self.released_visuals += 1;
        } else {
            warn!("release of unknown visual {:?}", visual);
            self.invalid_releases += 1;
        }
    }

    fn set_visual_scale(&mut self, visual: VisualHandle, scale: f32) {
        if let Some(record) = self.visuals.get_mut(&visual) {
            record.scale = scale;
        }
    }
}
