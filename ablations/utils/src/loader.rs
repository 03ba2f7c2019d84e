//! 对 `aha-berry::dataset` 的更一层封装. 提供更直接的数据集加载器.

use aha_berry::dataset::{self, CaseLoader};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// 获取数据集基本路径.
///
/// 1. 若环境变量 `$AHA_DATASET_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/aha`.
///
/// 两者都无法确定时返回 `None`.
pub fn dataset_dir_from_env_or_home() -> Option<PathBuf> {
    match env::var("AHA_DATASET_DIR") {
        Ok(d) if !d.is_empty() => Some(PathBuf::from(d)),
        _ => dataset::home_dataset_dir(),
    }
}

/// 列出 `path` 下所有病例目录的名字, 按字典序排列.
pub fn case_names<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort_unstable();
    Ok(names)
}

/// 获取 `path` 下全部病例的加载器.
pub fn case_loader<P: AsRef<Path>>(path: P) -> io::Result<CaseLoader> {
    let names = case_names(path.as_ref())?;
    Ok(dataset::case_loader(names, path))
}

/// 从 `$AHA_DATASET_DIR` 或者 `$HOME/dataset/aha` 下加载全部病例.
///
/// 目录不存在时返回 `None`.
pub fn case_loader_from_env_or_home() -> Option<io::Result<CaseLoader>> {
    let dir = dataset_dir_from_env_or_home()?;
    dir.is_dir().then(|| case_loader(dir))
}
