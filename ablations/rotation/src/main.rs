//! RV 插入点定位的消融实验.
//!
//! 1. 在合成体模上旋转 RV 附着弧, 统计插入点误差和耗时;
//! 2. 如果 `$AHA_DATASET_DIR` (或 `$HOME/dataset/aha`) 存在, 对其中全部病例计算 AHA 17 节段统计.

mod profile;
mod runner;

use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .expect("Logger initialization error");

    utils::sep();
    for (name, profile) in runner::run() {
        println!("Profile `{name}`:\n{profile}");
        utils::sep();
    }
}
