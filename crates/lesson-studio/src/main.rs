mod cube;
mod physics;

use anyhow::Result;
use lesson_engine::device::GpuInit;
use lesson_engine::logging::{init_logging, LoggingConfig};
use lesson_engine::window::{Runtime, RuntimeConfig};

use crate::cube::CubeLesson;
use crate::physics::PhysicsLesson;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let lesson = std::env::args().nth(1).unwrap_or_else(|| "cube".to_string());
    let config = RuntimeConfig {
        title: "lesson-studio".to_string(),
        ..RuntimeConfig::default()
    };

    log::info!("starting lesson '{lesson}'");
    match lesson.as_str() {
        "cube" => Runtime::run(config, GpuInit::default(), CubeLesson::default()),
        "physics" => Runtime::run(config, GpuInit::default(), PhysicsLesson::default()),
        other => anyhow::bail!("unknown lesson '{other}' (expected 'cube' or 'physics')"),
    }
}
