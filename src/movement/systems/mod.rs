//! Movement domain: system modules wiring the body into the app.

pub(crate) mod input;
pub(crate) mod relay;
pub(crate) mod step;

pub(crate) use input::{apply_runner_input, read_input};
pub(crate) use step::{
    advance_clock, spawn_runner, step_runners, sync_pause, sync_runner_transforms,
};
