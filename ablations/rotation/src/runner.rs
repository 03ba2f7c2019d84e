//! 程序运行函数.

use crate::profile::{angle_error, Profile};
use aha_berry::prelude::*;
use std::thread;
use utils::loader;

/// 体模分辨率.
const SHAPE: Idx2d = (128, 128);

/// 体模 LV 中心.
const CENTER: Idx2dF = (63.5, 64.0);

/// 参与实验的 RV 附着弧跨度 (单位: 度).
const ARCS: [i32; 4] = [60, 90, 120, 150];

/// 每次旋转的角度.
const ROTATION_STEP: usize = 10;

/// 固定附着弧跨度, 旋转一整圈.
fn sweep(arc: i32) -> Profile {
    let mut profile = Profile::new();
    let segmenter = Segmenter::default();

    for start in (0..360).step_by(ROTATION_STEP) {
        let start = start as i32;
        let input = Phantom::new(SHAPE, CENTER)
            .rv_arc(start as f64, (start + arc) as f64)
            .build();
        let slice = input.as_input().expect("Phantom shape error");

        profile.trial_start();
        let res = segmenter.run(
            &slice.lv_blood,
            &slice.lv_wall,
            &slice.rv_blood,
            SegmentCount::Six,
        );
        profile.trial_elapsed();

        match res {
            Ok(seg) => {
                let up = angle_error(seg.insertion.up, start);
                let down = angle_error(seg.insertion.down, start + arc);
                log::debug!("arc {arc} from {start}: {:?}, error = ({up}, {down})", seg.insertion);
                profile.count_error(up, down);
            }
            Err(e) => {
                log::warn!("arc {arc} from {start}: {e}");
                profile.count_failed();
            }
        }
    }
    profile.finish()
}

/// 对数据集中的全部病例计算 AHA 17 节段统计. 数据集不存在时返回 `None`.
fn dataset() -> Option<Profile> {
    let loader = match loader::case_loader_from_env_or_home()? {
        Ok(l) => l,
        Err(e) => {
            log::warn!("Loading dataset error: {e}");
            return None;
        }
    };

    let mut profile = Profile::new();
    for (name, case) in loader {
        let case = match case {
            Ok(c) => c,
            Err(e) => {
                log::warn!("case `{name}`: {e}");
                profile.count_failed();
                continue;
            }
        };
        let input = match case.as_aha17_input() {
            Ok(i) => i,
            Err(e) => {
                log::warn!("case `{name}`: {e}");
                profile.count_failed();
                continue;
            }
        };

        profile.trial_start();
        let res = aha17(&input);
        profile.trial_elapsed();

        match res {
            Ok(r) => {
                log::info!(
                    "case `{name}`: global mean = {:?}, septal mean = {:?}",
                    r.global().mean,
                    r.septal().mean
                );
                profile.count_done();
            }
            Err(e) => {
                log::warn!("case `{name}`: {e}");
                profile.count_failed();
            }
        }
    }
    Some(profile.finish())
}

/// 实际运行. 返回每组实验的名称与统计数据.
pub fn run() -> Vec<(String, Profile)> {
    log::info!("Running ablation studies on {} cpus...", utils::cpus());

    let mut result: Vec<(String, Profile)> = thread::scope(|s| {
        let handles = ARCS.map(|arc| s.spawn(move || sweep(arc)));

        ARCS.into_iter()
            .map(|arc| format!("phantom, arc = {arc}"))
            .zip(
                handles
                    .into_iter()
                    .map(|th| th.join().expect("Thread joining error")),
            )
            .collect()
    });

    match dataset() {
        Some(p) => result.push(("dataset".to_string(), p)),
        None => log::info!("Dataset not found, skipped"),
    }
    result
}
