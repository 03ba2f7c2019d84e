use crate::segment::SegError;
use crate::OwnedSliceInput;
use ndarray::{Array2, Ix2, OwnedRepr};
use ndarray_npy::{NpzReader, ReadNpzError};
use std::fmt::{Display, Formatter};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// LV 血池掩膜在 npz 中的文件名.
pub const LV_BLOOD_NAME: &str = "LVb_mask.npy";

/// LV 心肌掩膜在 npz 中的文件名.
pub const LV_WALL_NAME: &str = "LVw_mask.npy";

/// RV 血池掩膜在 npz 中的文件名.
pub const RV_BLOOD_NAME: &str = "RVb_mask.npy";

/// 定量参数图在 npz 中的文件名.
pub const QMAP_NAME: &str = "Qmap.npy";

/// 加载切片错误.
#[derive(Debug)]
pub enum LoadError {
    /// 底层 I/O 错误.
    IoError(std::io::Error),

    /// 读取 npz 文件错误.
    ReadNpzError(ReadNpzError),

    /// 各数组形状不一致.
    ShapeError(SegError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::IoError(e) => write!(f, "I/O error: {e}"),
            LoadError::ReadNpzError(e) => write!(f, "npz error: {e}"),
            LoadError::ShapeError(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::IoError(e) => Some(e),
            LoadError::ReadNpzError(e) => Some(e),
            LoadError::ShapeError(e) => Some(e),
        }
    }
}

/// 单个切片的 npz 文件.
///
/// 文件内必须包含 [`LV_BLOOD_NAME`], [`LV_WALL_NAME`], [`RV_BLOOD_NAME`] 三个二维掩膜
/// (`u8` 或 `bool`) 以及二维参数图 [`QMAP_NAME`] (`f64` 或 `f32`).
pub struct SliceArchive {
    reader: NpzReader<File>,
}

impl SliceArchive {
    /// 打开文件.
    pub fn open<P: AsRef<Path>>(p: P) -> Result<Self, LoadError> {
        let file = OpenOptions::new()
            .read(true)
            .open(p.as_ref())
            .map_err(LoadError::IoError)?;
        let reader = NpzReader::new(file).map_err(LoadError::ReadNpzError)?;
        Ok(Self { reader })
    }

    /// 获取 npz 文件包含的所有文件名.
    pub fn names(&mut self) -> Result<Vec<String>, LoadError> {
        self.reader.names().map_err(LoadError::ReadNpzError)
    }

    /// 读取掩膜. 先按 `u8` 读取, 失败后再按 `bool` 读取.
    pub fn mask_by_name(&mut self, name: &str) -> Result<Array2<u8>, LoadError> {
        match self.reader.by_name::<OwnedRepr<u8>, Ix2>(name) {
            Ok(v) => Ok(v),
            Err(e) => match self.reader.by_name::<OwnedRepr<bool>, Ix2>(name) {
                Ok(v) => Ok(v.mapv(u8::from)),
                Err(_) => Err(LoadError::ReadNpzError(e)),
            },
        }
    }

    /// 读取参数图. 先按 `f64` 读取, 失败后再按 `f32` 读取.
    pub fn map_by_name(&mut self, name: &str) -> Result<Array2<f64>, LoadError> {
        match self.reader.by_name::<OwnedRepr<f64>, Ix2>(name) {
            Ok(v) => Ok(v),
            Err(e) => match self.reader.by_name::<OwnedRepr<f32>, Ix2>(name) {
                Ok(v) => Ok(v.mapv(f64::from)),
                Err(_) => Err(LoadError::ReadNpzError(e)),
            },
        }
    }

    /// 读取完整的切片输入, 并检查形状一致性.
    pub fn read_slice(&mut self) -> Result<OwnedSliceInput, LoadError> {
        let input = OwnedSliceInput {
            lv_blood: self.mask_by_name(LV_BLOOD_NAME)?,
            lv_wall: self.mask_by_name(LV_WALL_NAME)?,
            rv_blood: self.mask_by_name(RV_BLOOD_NAME)?,
            qmap: self.map_by_name(QMAP_NAME)?,
        };
        input.as_input().map_err(LoadError::ShapeError)?;
        Ok(input)
    }
}

/// 从路径 `p` 加载单个切片.
pub fn load_slice<P: AsRef<Path>>(p: P) -> Result<OwnedSliceInput, LoadError> {
    SliceArchive::open(p)?.read_slice()
}
