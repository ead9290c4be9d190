use crate::composition::model::ContentGroup;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::policy::DurationPolicy;
use crate::timeline::selector::TemplateId;

/// Frames assigned to one content group.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimelineWindow {
    /// Index of the group in the input order.
    pub group_index: usize,
    /// First frame of the window.
    pub start: FrameIndex,
    /// Window length in frames.
    pub duration_frames: u64,
    /// Template that renders the group.
    pub template: TemplateId,
}

impl TimelineWindow {
    /// The window as a half-open frame range.
    pub fn range(&self) -> FrameRange {
        FrameRange::from_len(self.start.0, self.duration_frames)
    }
}

/// Where a composition frame falls on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement<'a> {
    /// Inside the intro; `local` counts from frame 0.
    Intro {
        /// Frame offset within the intro.
        local: u64,
    },
    /// Inside a group window; `local` counts from the window start.
    Window {
        /// The active window.
        window: &'a TimelineWindow,
        /// Frame offset within the window.
        local: u64,
    },
}

/// Contiguous, non-overlapping allocation of the whole composition.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Timeline {
    intro: FrameRange,
    windows: Vec<TimelineWindow>,
    total_frames: u64,
}

impl Timeline {
    /// The intro range, starting at frame 0.
    pub fn intro(&self) -> FrameRange {
        self.intro
    }

    /// Group windows in playback order.
    pub fn windows(&self) -> &[TimelineWindow] {
        &self.windows
    }

    /// Intro length plus every window length.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// The whole composition as a frame range.
    pub fn range(&self) -> FrameRange {
        FrameRange::from_len(0, self.total_frames)
    }

    /// Fail with [`ReelError::TimelineMismatch`] unless `declared` equals the allocated length.
    pub fn ensure_declared(&self, declared: u64) -> ReelResult<()> {
        if declared != self.total_frames {
            return Err(ReelError::TimelineMismatch {
                declared,
                computed: self.total_frames,
            });
        }
        Ok(())
    }

    /// Locate `frame`; `None` past the end of the timeline.
    pub fn locate(&self, frame: FrameIndex) -> Option<Placement<'_>> {
        if self.intro.contains(frame) {
            return Some(Placement::Intro { local: frame.0 });
        }
        let idx = self.windows.partition_point(|w| w.start <= frame);
        let window = self.windows.get(idx.checked_sub(1)?)?;
        window.range().contains(frame).then(|| Placement::Window {
            window,
            local: frame.0 - window.start.0,
        })
    }
}

/// Allocate an intro followed by one window per group.
///
/// Window `i` starts where window `i - 1` ends; the first starts at `intro_frames`.
#[tracing::instrument(skip(groups, policy), fields(groups = groups.len()))]
pub fn allocate(
    groups: &[ContentGroup],
    intro_frames: u64,
    policy: &DurationPolicy,
) -> ReelResult<Timeline> {
    policy.validate()?;

    let mut cursor = intro_frames;
    let mut windows = Vec::with_capacity(groups.len());
    for (group_index, group) in groups.iter().enumerate() {
        let choice = policy.resolve(group);
        let start = cursor;
        cursor = cursor.checked_add(choice.duration_frames).ok_or_else(|| {
            ReelError::invalid_config(format!(
                "timeline overflows u64 at group {group_index} ('{}')",
                group.key
            ))
        })?;
        tracing::debug!(
            group_index,
            key = %group.key,
            count = group.count(),
            template = %choice.template,
            start,
            duration = choice.duration_frames,
            "allocated window"
        );
        windows.push(TimelineWindow {
            group_index,
            start: FrameIndex(start),
            duration_frames: choice.duration_frames,
            template: choice.template,
        });
    }

    Ok(Timeline {
        intro: FrameRange::from_len(0, intro_frames),
        windows,
        total_frames: cursor,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/allocator.rs"]
mod tests;
