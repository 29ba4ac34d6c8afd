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

/// Specifies details about a file for upload operations.
///
/// Contains metadata about a file including its name, path, and MIME type,
/// used to build a multipart/form-data upload body.
#[derive(Clone, Debug)]
pub struct FileSpec {
    /// The form field name associated with this file.
    pub name: String,
    /// The full path to the file on disk.
    pub path: String,
    /// The name of the file without directory information.
    pub file_name: String,
    /// The MIME type of the file (e.g., "image/jpeg").
    pub mime_type: String,
}

impl FileSpec {
    pub(crate) fn new(path: String) -> Self {
        let file_name = path
            .rsplit('/')
            .next()
            .unwrap_or(path.as_str())
            .to_string();
        Self {
            name: "file".to_string(),
            path,
            file_name,
            mime_type: "application/octet-stream".to_string(),
        }
    }
}

/// Represents a key-value pair in a form submission.
///
/// Used for including text-based form data in requests alongside file uploads.
#[derive(Clone, Debug)]
pub(crate) struct FormItem {
    /// The name of the form field.
    pub(crate) name: String,
    /// The value associated with the form field.
    pub(crate) value: String,
}
