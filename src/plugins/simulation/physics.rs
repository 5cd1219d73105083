use crate::prelude::*;

/// Advances the flock by the frame's delta time.
pub fn tick_flock(time: Res<Time>, mut flock: ResMut<Flock>) {
    match flock.advance(time.delta()) {
        TickOutcome::Advanced => {}
        TickOutcome::Settling => debug!("Flock settling after rebuild"),
        TickOutcome::SkippedHitch => debug!("Frame hitch of {:?}, tick skipped", time.delta()),
    }
}

/// Sends `AppExit` once the flock has advanced `TickLimit` times.
pub fn exit_after_tick_limit(
    limit: Res<TickLimit>,
    flock: Res<Flock>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(limit) = **limit else {
        return;
    };

    if flock.ticks() >= limit {
        info!("Reached tick limit of {}", limit);
        exit.write(AppExit::Success);
    }
}
