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

//! Persistent task store backed by `rusqlite`.
//!
//! Replaces the teacher's cxx-bridged `RequestDataBase` with a plain
//! `rusqlite::Connection` guarded by a mutex (SQLite connections are not
//! `Sync`). Schema and migration semantics follow the original
//! `c_request_database.h` table definition.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use rusqlite::{Connection, OptionalExtension};

use crate::task::config::{Action, CommonTaskConfig, MinSpeed, Mode, NetworkConfig, TaskConfig, Timeout, Version};
use crate::task::info::{CommonTaskInfo, State, TaskInfo, UpdateInfo};
use crate::task::notify::Progress;
use crate::task::reason::Reason;
use crate::utils::form_item::{FileSpec, FormItem};
use crate::utils::{get_current_timestamp, hashmap_to_string, string_to_hashmap};

/// Schema version this binary expects. Bumped whenever a column is added.
const REQUEST_DATABASE_VERSION: i64 = 2;

const CREATE_REQUEST_TASK_TABLE: &str = "CREATE TABLE IF NOT EXISTS request_task (
    task_id INTEGER PRIMARY KEY,
    uid INTEGER,
    token_id INTEGER,
    action INTEGER,
    mode INTEGER,
    cover INTEGER,
    network INTEGER,
    metered INTEGER,
    roaming INTEGER,
    ctime INTEGER,
    mtime INTEGER,
    reason INTEGER,
    gauge INTEGER,
    retry INTEGER,
    redirect INTEGER,
    tries INTEGER,
    version INTEGER,
    config_idx INTEGER,
    begins INTEGER,
    ends INTEGER,
    precise INTEGER,
    priority INTEGER,
    background INTEGER,
    bundle TEXT,
    url TEXT,
    data TEXT,
    token TEXT,
    title TEXT,
    description TEXT,
    method TEXT,
    headers TEXT,
    config_extras TEXT,
    mime_type TEXT,
    state INTEGER,
    idx INTEGER,
    total_processed INTEGER,
    sizes TEXT,
    processed TEXT,
    extras TEXT,
    form_items BLOB,
    file_specs BLOB,
    each_file_status BLOB,
    body_file_names BLOB,
    certs_paths BLOB,
    proxy TEXT,
    certificate_pins TEXT
)";

const CREATE_REQUEST_VERSION_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS request_version (id INTEGER PRIMARY KEY, version INTEGER, task_table TEXT)";

/// A filter used by [`RequestDb::query_by`].
#[derive(Default, Clone)]
pub(crate) struct TaskFilter {
    pub(crate) uid: Option<u64>,
    pub(crate) state: Option<State>,
    pub(crate) action: Option<Action>,
}

pub(crate) struct RequestDb {
    conn: Mutex<Connection>,
}

impl RequestDb {
    pub(crate) fn get_instance() -> &'static Self {
        static INSTANCE: OnceLock<RequestDb> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let conn = if cfg!(test) {
                Connection::open_in_memory().expect("open in-memory sqlite connection")
            } else {
                Connection::open("/data/service/el1/public/database/request/request.db")
                    .expect("open request.db")
            };
            let db = RequestDb {
                conn: Mutex::new(conn),
            };
            db.init_schema();
            db
        })
    }

    fn init_schema(&self) {
        let conn = self.conn.lock().unwrap();
        conn.execute(CREATE_REQUEST_TASK_TABLE, ()).unwrap();
        conn.execute(CREATE_REQUEST_VERSION_TABLE, ()).unwrap();

        let version: Option<i64> = conn
            .query_row("SELECT version FROM request_version WHERE id = 1", (), |row| row.get(0))
            .optional()
            .unwrap();

        match version {
            None => {
                conn.execute(
                    "INSERT INTO request_version (id, version, task_table) VALUES (1, ?, 'request_task')",
                    (REQUEST_DATABASE_VERSION,),
                )
                .unwrap();
            }
            Some(v) if v < REQUEST_DATABASE_VERSION => {
                // Columns `proxy`/`certificate_pins` were added at version 2.
                // A freshly created table above already has them; these
                // ALTERs only matter for stores created by an older binary.
                let _ = conn.execute("ALTER TABLE request_task ADD COLUMN proxy TEXT", ());
                let _ = conn.execute("ALTER TABLE request_task ADD COLUMN certificate_pins TEXT", ());
                conn.execute(
                    "UPDATE request_version SET version = ? WHERE id = 1",
                    (REQUEST_DATABASE_VERSION,),
                )
                .unwrap();
            }
            Some(_) => {}
        }
    }

    pub(crate) fn execute(&self, sql: &str, params: impl rusqlite::Params) -> Result<usize, rusqlite::Error> {
        self.conn.lock().unwrap().execute(sql, params)
    }

    pub(crate) fn contains_task(&self, task_id: u32) -> bool {
        self.conn
            .lock()
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM request_task WHERE task_id = ?",
                (task_id,),
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    /// Inserts a brand-new task in state `Initialized`/`Waiting`.
    pub(crate) fn insert_task(&self, task_id: u32, config: &TaskConfig) -> bool {
        if self.contains_task(task_id) {
            return false;
        }
        let now = get_current_timestamp();
        let conn = self.conn.lock().unwrap();
        let sql = "INSERT INTO request_task (
            task_id, uid, token_id, action, mode, cover, network, metered, roaming, ctime, mtime,
            reason, gauge, retry, redirect, tries, version, config_idx, begins, ends, precise,
            priority, background, bundle, url, data, token, title, description, method, headers,
            config_extras, mime_type, state, idx, total_processed, sizes, processed, extras,
            form_items, file_specs, body_file_names, certs_paths, proxy, certificate_pins
        ) VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)";
        conn.execute(
            sql,
            rusqlite::params![
                task_id,
                config.common_data.uid,
                config.common_data.token_id,
                config.common_data.action as u8,
                config.common_data.mode as u8,
                config.common_data.cover,
                config.common_data.network_config as u8,
                config.common_data.metered,
                config.common_data.roaming,
                now,
                now,
                Reason::Default as u8,
                config.common_data.gauge,
                config.common_data.retry,
                config.common_data.redirect,
                0u32,
                config.version as u8,
                config.common_data.index,
                config.common_data.begins,
                config.common_data.ends,
                config.common_data.precise,
                config.common_data.priority,
                config.common_data.background,
                &config.bundle,
                &config.url,
                &config.data,
                &config.token,
                &config.title,
                &config.description,
                &config.method,
                hashmap_to_string(&config.headers),
                hashmap_to_string(&config.extras),
                "",
                State::Waiting as u8,
                0u32,
                0u64,
                encode_i64_vec(&vec![-1; config.file_specs.len().max(1)]),
                encode_i64_vec(&vec![0; config.file_specs.len().max(1)]),
                "",
                encode_form_items(&config.form_items),
                encode_file_specs(&config.file_specs),
                encode_strings(&config.body_file_paths),
                encode_strings(&config.certs_path),
                &config.proxy,
                &config.certificate_pins,
            ],
        )
        .unwrap();
        true
    }

    pub(crate) fn update_task_state(&self, task_id: u32, state: State, reason: Reason) {
        let _ = self.execute(
            "UPDATE request_task SET state = ?, mtime = ?, reason = ? WHERE task_id = ?",
            (state as u8, get_current_timestamp(), reason as u8, task_id),
        );
    }

    pub(crate) fn update_task_progress(&self, task_id: u32, update_info: &UpdateInfo) {
        let _ = self.execute(
            "UPDATE request_task SET mtime = ?, reason = ?, tries = ?, mime_type = ?, idx = ?, \
             total_processed = ?, sizes = ?, processed = ?, extras = ? WHERE task_id = ?",
            (
                update_info.mtime,
                update_info.reason,
                update_info.tries,
                &update_info.mime_type,
                update_info.progress.common_data.index as u32,
                update_info.progress.common_data.total_processed as u64,
                encode_i64_vec(&update_info.progress.sizes),
                encode_usize_vec(&update_info.progress.processed),
                hashmap_to_string(&update_info.progress.extras),
                task_id,
            ),
        );
    }

    pub(crate) fn query_task_uid(&self, task_id: u32) -> Option<u64> {
        self.conn
            .lock()
            .unwrap()
            .query_row("SELECT uid FROM request_task WHERE task_id = ?", (task_id,), |row| {
                row.get(0)
            })
            .optional()
            .unwrap()
    }

    pub(crate) fn query_task_state(&self, task_id: u32) -> Option<State> {
        self.conn
            .lock()
            .unwrap()
            .query_row("SELECT state FROM request_task WHERE task_id = ?", (task_id,), |row| {
                row.get::<_, u8>(0)
            })
            .optional()
            .unwrap()
            .map(State::from)
    }

    pub(crate) fn delete_task(&self, task_id: u32) {
        let _ = self.execute("DELETE FROM request_task WHERE task_id = ?", (task_id,));
    }

    pub(crate) fn get_task_config(&self, task_id: u32) -> Option<TaskConfig> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT uid, token_id, action, mode, cover, network, metered, roaming, gauge, retry, \
             redirect, config_idx, begins, ends, precise, priority, background, bundle, url, data, \
             token, title, description, method, headers, config_extras, version, form_items, \
             file_specs, body_file_names, certs_paths, proxy, certificate_pins FROM request_task \
             WHERE task_id = ?",
            (task_id,),
            |row| {
                Ok(TaskConfig {
                    bundle: row.get(17)?,
                    url: row.get(18)?,
                    title: row.get(21)?,
                    description: row.get(22)?,
                    method: row.get(23)?,
                    headers: string_to_hashmap(&mut row.get::<_, String>(24)?),
                    data: row.get(19)?,
                    token: row.get(20)?,
                    proxy: row.get(31)?,
                    certificate_pins: row.get(32)?,
                    extras: string_to_hashmap(&mut row.get::<_, String>(25)?),
                    version: Version::from(row.get::<_, u8>(26)?),
                    form_items: decode_form_items(&row.get::<_, Vec<u8>>(27)?),
                    file_specs: decode_file_specs(&row.get::<_, Vec<u8>>(28)?),
                    body_file_paths: decode_strings(&row.get::<_, Vec<u8>>(29)?),
                    certs_path: decode_strings(&row.get::<_, Vec<u8>>(30)?),
                    common_data: CommonTaskConfig {
                        task_id,
                        uid: row.get(0)?,
                        token_id: row.get(1)?,
                        action: Action::from(row.get::<_, u8>(2)?),
                        mode: Mode::from(row.get::<_, u8>(3)?),
                        cover: row.get(4)?,
                        network_config: NetworkConfig::from(row.get::<_, u8>(5)?),
                        metered: row.get(6)?,
                        roaming: row.get(7)?,
                        retry: row.get(9)?,
                        redirect: row.get(10)?,
                        index: row.get(11)?,
                        begins: row.get(12)?,
                        ends: row.get(13)?,
                        gauge: row.get(8)?,
                        precise: row.get(14)?,
                        priority: row.get(15)?,
                        background: row.get(16)?,
                        multipart: false,
                        min_speed: MinSpeed::default(),
                        timeout: Timeout::default(),
                    },
                })
            },
        )
        .optional()
        .unwrap()
    }

    pub(crate) fn get_task_info(&self, task_id: u32) -> Option<TaskInfo> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT uid, action, mode, mtime, reason, gauge, retry, tries, version, priority, \
             ctime, url, data, token, bundle, title, description, mime_type, state, idx, \
             total_processed, sizes, processed, extras, file_specs FROM request_task \
             WHERE task_id = ?",
            (task_id,),
            |row| {
                let sizes = decode_i64_vec(&row.get::<_, Vec<u8>>(21)?);
                let processed = decode_usize_vec(&row.get::<_, Vec<u8>>(22)?);
                let file_specs = decode_file_specs(&row.get::<_, Vec<u8>>(24)?);
                let reason: u8 = row.get(4)?;
                let mut info = TaskInfo {
                    bundle: row.get(14)?,
                    url: row.get(11)?,
                    data: row.get(12)?,
                    token: row.get(13)?,
                    form_items: vec![],
                    file_specs,
                    title: row.get(15)?,
                    description: row.get(16)?,
                    mime_type: row.get(17)?,
                    progress: Progress {
                        common_data: crate::task::notify::CommonProgress {
                            state: row.get::<_, u8>(18)?,
                            index: row.get::<_, u32>(19)? as usize,
                            total_processed: row.get::<_, u64>(20)? as usize,
                        },
                        sizes,
                        processed,
                        extras: string_to_hashmap(&mut row.get::<_, String>(23)?),
                    },
                    extras: HashMap::new(),
                    common_data: CommonTaskInfo {
                        task_id,
                        uid: row.get(0)?,
                        action: row.get::<_, u8>(1)?,
                        mode: row.get::<_, u8>(2)?,
                        ctime: row.get(10)?,
                        mtime: row.get(3)?,
                        reason,
                        gauge: row.get(5)?,
                        retry: row.get(6)?,
                        tries: row.get(7)?,
                        version: row.get(8)?,
                        priority: row.get(9)?,
                    },
                    max_speed: 0,
                    task_time: row.get(3)?,
                };
                info.extras = string_to_hashmap(&mut hashmap_to_string(&info.extras));
                Ok(info)
            },
        )
        .optional()
        .unwrap()
    }

    pub(crate) fn query_by(&self, filter: &TaskFilter) -> Vec<u32> {
        let conn = self.conn.lock().unwrap();
        let mut sql = "SELECT task_id FROM request_task WHERE 1 = 1".to_string();
        if let Some(uid) = filter.uid {
            sql.push_str(&format!(" AND uid = {}", uid));
        }
        if let Some(state) = filter.state {
            if state != State::Any {
                sql.push_str(&format!(" AND state = {}", state as u8));
            }
        }
        if let Some(action) = filter.action {
            if action != Action::Any {
                sql.push_str(&format!(" AND action = {}", action as u8));
            }
        }
        let mut stmt = conn.prepare(&sql).unwrap();
        let rows = stmt.query_map((), |row| row.get::<_, u32>(0)).unwrap();
        rows.filter_map(Result::ok).collect()
    }

    /// Forces `running`/`retrying` tasks to `failed` (reason `app_terminated`
    /// via [`Reason::AppBackgroundOrTerminate`]), re-enqueues `waiting`
    /// tasks, and leaves `paused` tasks untouched. Runs once at startup.
    pub(crate) fn sweep_on_startup(&self) -> Vec<u32> {
        let conn = self.conn.lock().unwrap();
        let _ = conn.execute(
            "UPDATE request_task SET state = ?, mtime = ?, reason = ? WHERE state IN (?, ?)",
            (
                State::Failed as u8,
                get_current_timestamp(),
                Reason::AppBackgroundOrTerminate as u8,
                State::Running as u8,
                State::Retrying as u8,
            ),
        );
        let mut stmt = conn
            .prepare("SELECT task_id FROM request_task WHERE state = ?")
            .unwrap();
        let rows = stmt
            .query_map((State::Waiting as u8,), |row| row.get::<_, u32>(0))
            .unwrap();
        rows.filter_map(Result::ok).collect()
    }

    /// Deletes terminal tasks older than `retention_window`.
    pub(crate) fn sweep_expired(&self, retention_window: std::time::Duration) -> usize {
        let cutoff = get_current_timestamp().saturating_sub(retention_window.as_millis() as u64);
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM request_task WHERE mtime < ? AND state IN (?, ?, ?)",
            (
                cutoff,
                State::Completed as u8,
                State::Failed as u8,
                State::Removed as u8,
            ),
        )
        .unwrap_or(0)
    }
}

unsafe impl Send for RequestDb {}
unsafe impl Sync for RequestDb {}

fn encode_strings(items: &[String]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(items.len() as u32).to_le_bytes());
    for item in items {
        let bytes = item.as_bytes();
        buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        buf.extend_from_slice(bytes);
    }
    buf
}

fn decode_strings(buf: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = 0usize;
    if buf.len() < 4 {
        return out;
    }
    let count = u32::from_le_bytes(buf[0..4].try_into().unwrap()) as usize;
    cursor += 4;
    for _ in 0..count {
        if cursor + 4 > buf.len() {
            break;
        }
        let len = u32::from_le_bytes(buf[cursor..cursor + 4].try_into().unwrap()) as usize;
        cursor += 4;
        if cursor + len > buf.len() {
            break;
        }
        out.push(String::from_utf8_lossy(&buf[cursor..cursor + len]).into_owned());
        cursor += len;
    }
    out
}

fn encode_form_items(items: &[FormItem]) -> Vec<u8> {
    let mut flat = Vec::with_capacity(items.len() * 2);
    for item in items {
        flat.push(item.name.clone());
        flat.push(item.value.clone());
    }
    encode_strings(&flat)
}

fn decode_form_items(buf: &[u8]) -> Vec<FormItem> {
    let flat = decode_strings(buf);
    flat.chunks_exact(2)
        .map(|pair| FormItem {
            name: pair[0].clone(),
            value: pair[1].clone(),
        })
        .collect()
}

fn encode_file_specs(items: &[FileSpec]) -> Vec<u8> {
    let mut flat = Vec::with_capacity(items.len() * 4);
    for item in items {
        flat.push(item.name.clone());
        flat.push(item.path.clone());
        flat.push(item.file_name.clone());
        flat.push(item.mime_type.clone());
    }
    encode_strings(&flat)
}

fn decode_file_specs(buf: &[u8]) -> Vec<FileSpec> {
    let flat = decode_strings(buf);
    flat.chunks_exact(4)
        .map(|chunk| FileSpec {
            name: chunk[0].clone(),
            path: chunk[1].clone(),
            file_name: chunk[2].clone(),
            mime_type: chunk[3].clone(),
        })
        .collect()
}

fn encode_i64_vec(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_i64_vec(buf: &[u8]) -> Vec<i64> {
    let s = String::from_utf8_lossy(buf);
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').filter_map(|part| part.parse().ok()).collect()
}

fn encode_usize_vec(values: &[usize]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_usize_vec(buf: &[u8]) -> Vec<usize> {
    let s = String::from_utf8_lossy(buf);
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').filter_map(|part| part.parse().ok()).collect()
}
