use anyhow::Result;

use crate::model::RemoteConfig;

mod app;
mod input;
mod view;

pub fn run(remote: RemoteConfig) -> Result<()> {
    app::run(remote)
}
