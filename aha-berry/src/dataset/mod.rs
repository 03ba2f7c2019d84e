//! 数据集操作.
//!
//! 每个病例是一个目录, 其中 `basal.npz`, `mid.npz`, `apical.npz` 分别保存三个切片,
//! 任意一个都可以缺失.

use crate::aha17::Aha17Input;
use crate::segment::SegResult;
use crate::{OwnedSliceInput, SliceLevel};
use std::path::{Path, PathBuf};

mod npz;

pub use npz::{
    load_slice, LoadError, SliceArchive, LV_BLOOD_NAME, LV_WALL_NAME, QMAP_NAME, RV_BLOOD_NAME,
};

/// 获取 `{用户主目录}/dataset/aha` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    ans.push("aha");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset/aha` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 切片在病例目录下的文件名.
pub fn slice_file_name(level: SliceLevel) -> &'static str {
    match level {
        SliceLevel::Basal => "basal.npz",
        SliceLevel::Mid => "mid.npz",
        SliceLevel::Apical => "apical.npz",
    }
}

/// 一个病例的三个切片.
#[derive(Clone, Debug, Default)]
pub struct Case {
    slices: [Option<OwnedSliceInput>; 3],
}

impl Case {
    /// 从病例目录加载. 切片文件不存在时视为缺失, 其他错误直接返回.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, LoadError> {
        let mut case = Self::default();
        for level in SliceLevel::ALL {
            let path = dir.as_ref().join(slice_file_name(level));
            if !path.is_file() {
                log::debug!("{} not found, {level} slice missing", path.display());
                continue;
            }
            case.slices[level.index()] = Some(load_slice(&path)?);
        }
        Ok(case)
    }

    /// 获取 `level` 层级的切片.
    #[inline]
    pub fn get(&self, level: SliceLevel) -> Option<&OwnedSliceInput> {
        self.slices[level.index()].as_ref()
    }

    /// 设置 `level` 层级的切片.
    #[inline]
    pub fn set(&mut self, level: SliceLevel, input: OwnedSliceInput) {
        self.slices[level.index()] = Some(input);
    }

    /// 转换为 [`crate::aha17::aha17`] 的输入.
    pub fn as_aha17_input(&self) -> SegResult<Aha17Input<'_>> {
        let mut input = Aha17Input::new();
        for level in SliceLevel::ALL {
            if let Some(s) = self.get(level) {
                input = input.with(level, s.as_input()?);
            }
        }
        Ok(input)
    }
}

/// 病例加载器, 按给定顺序迭代 `path` 下的病例目录.
#[derive(Debug)]
pub struct CaseLoader {
    path: PathBuf,
    names_rev: Vec<String>,
}

/// 创建病例加载器.
///
/// # 注意
///
/// `path` 必须是目录, 否则程序 panic.
pub fn case_loader<S: Into<String>, I: IntoIterator<Item = S>, P: AsRef<Path>>(
    names: I,
    path: P,
) -> CaseLoader {
    let path = path.as_ref().to_owned();
    assert!(path.is_dir(), "`{}` 不是目录", path.display());

    let mut names_rev: Vec<String> = names.into_iter().map(Into::into).collect();
    names_rev.reverse();
    CaseLoader { path, names_rev }
}

impl Iterator for CaseLoader {
    type Item = (String, Result<Case, LoadError>);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names_rev.pop()?;
        let case = Case::open(self.path.join(&name));
        Some((name, case))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.names_rev.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for CaseLoader {}

#[cfg(test)]
mod tests {
    use super::{case_loader, home_dataset_dir_with, slice_file_name, Case};
    use crate::aha17::aha17;
    use crate::{Phantom, SliceLevel};
    use ndarray_npy::NpzWriter;
    use std::fs::File;
    use std::path::Path;

    fn write_slice(path: &Path, p: &Phantom) {
        let input = p.build();
        let mut npz = NpzWriter::new(File::create(path).unwrap());
        npz.add_array("LVb_mask.npy", &input.lv_blood).unwrap();
        npz.add_array("LVw_mask.npy", &input.lv_wall).unwrap();
        npz.add_array("RVb_mask.npy", &input.rv_blood).unwrap();
        npz.add_array("Qmap.npy", &input.qmap).unwrap();
        npz.finish().unwrap();
    }

    #[test]
    fn test_home_dir() {
        if let Some(p) = home_dataset_dir_with(["case-1", "mid.npz"]) {
            assert!(p.ends_with("dataset/aha/case-1/mid.npz"));
        }
    }

    #[test]
    fn test_case_loader() {
        let mut root = std::env::temp_dir();
        root.push(format!("aha-berry-cases-{}", std::process::id()));
        let case_dir = root.join("case-1");
        std::fs::create_dir_all(&case_dir).unwrap();

        let p = Phantom::new((64, 64), (32.0, 32.0)).wall_value(900.0);
        write_slice(&case_dir.join(slice_file_name(SliceLevel::Mid)), &p);

        let mut loader = case_loader(["case-1", "case-2"], &root);
        assert_eq!(loader.len(), 2);

        let (name, case) = loader.next().unwrap();
        assert_eq!(name, "case-1");
        let case: Case = case.unwrap();
        assert!(case.get(SliceLevel::Basal).is_none());
        assert!(case.get(SliceLevel::Mid).is_some());
        let res = aha17(&case.as_aha17_input().unwrap()).unwrap();
        assert_eq!(res.segment(7).mean, 900.0);
        assert_eq!(res.segment(1).mean, 0.0);

        // 不存在的病例目录: 三个切片都缺失.
        let (name, case) = loader.next().unwrap();
        assert_eq!(name, "case-2");
        assert!(case.unwrap().get(SliceLevel::Mid).is_none());
        assert!(loader.next().is_none());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
