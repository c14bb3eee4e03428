//! Display-ready derived values computed from raw progress counters.
//!
//! All functions are pure. Percentages are whole numbers in `[0, 100]`,
//! rounded half up; inputs that break the caller's contract (more completed
//! tasks than total tasks) are clamped rather than rejected.

use crate::model::{Level, ReadinessBreakdown, TrackProgress};

/// Points needed to finish one band.
pub const BAND_WIDTH: u32 = 100;

pub const DSA_TARGET: u32 = 20;
pub const ANALYTICS_TARGET: u32 = 6;
pub const DATASCIENCE_TARGET: u32 = 4;
pub const ML_TARGET: u32 = 3;

/// Level band for a point total. Band boundaries belong to the higher band.
#[must_use]
pub fn level_for(points: u32) -> Level {
    if points >= Level::Advanced.floor() {
        Level::Advanced
    } else if points >= Level::Intermediate.floor() {
        Level::Intermediate
    } else {
        Level::Beginner
    }
}

/// Fill of the progress bar for `band`, given the user's points.
///
/// Bands the user has not reached are empty; passed bands are full.
#[must_use]
pub fn level_bar_fill(points: u32, band: Level) -> u8 {
    let floor = band.floor();
    if points < floor {
        return 0;
    }
    clamp_percent(u64::from((points - floor).min(BAND_WIDTH)))
}

/// Points remaining until the next band, or 0 at the top band.
#[must_use]
pub fn points_to_next_level(points: u32) -> u32 {
    match level_for(points) {
        Level::Beginner => Level::Intermediate.floor() - points,
        Level::Intermediate => Level::Advanced.floor() - points,
        Level::Advanced => 0,
    }
}

/// Completion of a single track.
#[must_use]
pub fn per_track_completion(track: &TrackProgress) -> u8 {
    ratio_percent(
        u64::from(track.completed_tasks),
        u64::from(track.total_tasks),
    )
}

/// Completion across all tracks, weighted by task count.
///
/// An empty sequence (or one with no tasks at all) is 0% complete.
#[must_use]
pub fn aggregate_completion<'a, I>(tracks: I) -> u8
where
    I: IntoIterator<Item = &'a TrackProgress>,
{
    let (completed, total) = tracks.into_iter().fold((0_u64, 0_u64), |(c, t), track| {
        (
            c + u64::from(track.completed_tasks),
            t + u64::from(track.total_tasks),
        )
    });
    ratio_percent(completed, total)
}

/// Total completed tasks across tracks.
#[must_use]
pub fn completed_task_count<'a, I>(tracks: I) -> u64
where
    I: IntoIterator<Item = &'a TrackProgress>,
{
    tracks
        .into_iter()
        .map(|track| u64::from(track.completed_tasks))
        .sum()
}

#[must_use]
pub fn track_is_complete(track: &TrackProgress) -> bool {
    track.total_tasks > 0 && track.completed_tasks >= track.total_tasks
}

/// Fill of a readiness breakdown bar: `count` out of a fixed `target`.
#[must_use]
pub fn breakdown_fill(count: u32, target: u32) -> u8 {
    ratio_percent(u64::from(count), u64::from(target))
}

/// Breakdown bar fills in display order: DSA, analytics, data science, ML.
#[must_use]
pub fn breakdown_fills(breakdown: &ReadinessBreakdown) -> [u8; 4] {
    [
        breakdown_fill(breakdown.dsa, DSA_TARGET),
        breakdown_fill(breakdown.analytics, ANALYTICS_TARGET),
        breakdown_fill(breakdown.datascience, DATASCIENCE_TARGET),
        breakdown_fill(breakdown.ml, ML_TARGET),
    ]
}

fn ratio_percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    clamp_percent((part * 100 + whole / 2) / whole)
}

fn clamp_percent(value: u64) -> u8 {
    u8::try_from(value.min(100)).unwrap_or(100)
}
