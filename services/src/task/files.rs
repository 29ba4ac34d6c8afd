// Copyright (C) 2023 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub use crate::utils::form_item::FileSpec;

use std::fs::{File, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};

use crate::error::ServiceError;
use crate::task::config::{Action, TaskConfig};

/// Container for all files associated with a network task.
///
/// Manages the main task files (upload/download targets) and their sizes,
/// as well as any additional body files used for multipart requests.
pub(crate) struct AttachedFiles {
    /// Main files for the task (upload sources or download destinations).
    pub(crate) files: Files,
    /// Sizes of the main files in bytes (negative values indicate unknown size).
    pub(crate) sizes: Vec<i64>,
    /// Additional body files for complex request scenarios.
    pub(crate) body_files: Files,
}

impl AttachedFiles {
    /// Opens all files specified in the task configuration.
    ///
    /// # Errors
    /// Returns a `ServiceError` if any file fails to open.
    pub(crate) fn open(config: &TaskConfig) -> Result<AttachedFiles, ServiceError> {
        let (files, sizes) = open_task_files(config)?;
        let body_files = open_body_files(config)?;
        Ok(Self {
            files,
            sizes,
            body_files,
        })
    }
}

fn open_task_files(config: &TaskConfig) -> Result<(Files, Vec<i64>), ServiceError> {
    let tid = config.common_data.task_id;
    let mut files = Vec::new();
    let mut sizes = Vec::new();

    for (idx, fs) in config.file_specs.iter().enumerate() {
        match config.common_data.action {
            Action::Upload => {
                let file = cvt_res_error!(
                    open_file_readonly(&fs.path).map_err(ServiceError::IoError),
                    "Cannot open upload file - task_id: {}, idx: {}",
                    tid,
                    idx
                );
                let size = cvt_res_error!(
                    file.metadata()
                        .map(|data| data.len())
                        .map_err(ServiceError::IoError),
                    "Cannot get upload file's size - task_id: {}, idx: {}",
                    tid,
                    idx
                );
                files.push(Arc::new(Mutex::new(file)));
                sizes.push(size as i64);
            }
            Action::Download => {
                let file = cvt_res_error!(
                    open_file_readwrite(&fs.path).map_err(ServiceError::IoError),
                    "Cannot open download file - task_id: {}, idx: {}",
                    tid,
                    idx
                );
                files.push(Arc::new(Mutex::new(file)));
                sizes.push(-1);
            }
            Action::Any => unreachable!("Action::Any in open_task_files should never reach"),
        }
    }
    Ok((Files::new(files), sizes))
}

fn open_body_files(config: &TaskConfig) -> Result<Files, ServiceError> {
    let tid = config.common_data.task_id;
    let mut body_files = Vec::new();

    for (idx, path) in config.body_file_paths.iter().enumerate() {
        let file = open_file_readwrite(path).map_err(|e| {
            error!("Open body_file failed - task_id: {}, idx: {}", tid, idx);
            ServiceError::IoError(e)
        })?;
        body_files.push(Arc::new(Mutex::new(file)));
    }

    Ok(Files::new(body_files))
}

fn open_file_readwrite(path: &str) -> io::Result<File> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    cvt_res_error!(
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path),
        "open_file_readwrite failed"
    )
}

fn open_file_readonly(path: &str) -> io::Result<File> {
    cvt_res_error!(OpenOptions::new().read(true).open(path), "open_file_readonly failed")
}

/// Thread-safe collection of file handles.
pub(crate) struct Files(Vec<Arc<Mutex<File>>>);

impl Files {
    fn new(files: Vec<Arc<Mutex<File>>>) -> Self {
        Self(files)
    }

    /// Returns the number of files in the collection.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the collection holds no files.
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a file handle at the specified index, if it exists.
    pub(crate) fn get(&self, index: usize) -> Option<Arc<Mutex<File>>> {
        self.0.get(index).cloned()
    }
}
