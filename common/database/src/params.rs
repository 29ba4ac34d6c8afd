// Copyright (C) 2024 Huawei Device Co., Ltd.
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

//! SQL parameter binding and result extraction utilities.
//!
//! This module provides traits and implementations for converting between
//! Rust types and SQL values, for both binding query parameters and reading
//! typed columns back out of result rows.

use rusqlite::types::{Value, ValueRef};
use rusqlite::Row;

/// Trait for converting Rust types to SQL bind parameters.
pub trait ToSql {
    /// Converts the value to an owned SQL value.
    fn to_sql(&self) -> Value;
}

/// Trait for converting a single SQL column to a Rust type.
pub trait FromSql: Sized {
    /// Reads the column at `index` out of `row`.
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self>;
}

/// Trait for converting a whole result row to a Rust type.
///
/// Implemented for any single `FromSql` type (reading column 0) and for
/// tuples of up to 16 `FromSql` types (reading one column per field, in
/// order), mirroring `query`'s ability to return either a scalar or a tuple
/// per row.
pub trait FromRow: Sized {
    /// Reads an entire row into `Self`.
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

impl<T: FromSql> FromRow for T {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        T::from_sql(0, row)
    }
}

impl ToSql for i32 {
    fn to_sql(&self) -> Value {
        Value::Integer(*self as i64)
    }
}

impl ToSql for i64 {
    fn to_sql(&self) -> Value {
        Value::Integer(*self)
    }
}

impl ToSql for u32 {
    fn to_sql(&self) -> Value {
        Value::Integer(*self as i64)
    }
}

impl ToSql for u64 {
    fn to_sql(&self) -> Value {
        Value::Integer(*self as i64)
    }
}

impl ToSql for f64 {
    fn to_sql(&self) -> Value {
        Value::Real(*self)
    }
}

impl ToSql for bool {
    fn to_sql(&self) -> Value {
        Value::Integer(if *self { 1 } else { 0 })
    }
}

impl ToSql for String {
    fn to_sql(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToSql for str {
    fn to_sql(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToSql for [u8] {
    fn to_sql(&self) -> Value {
        Value::Blob(self.to_vec())
    }
}

impl ToSql for Vec<u8> {
    fn to_sql(&self) -> Value {
        Value::Blob(self.clone())
    }
}

impl<T: ?Sized + ToSql> ToSql for &T {
    fn to_sql(&self) -> Value {
        (*self).to_sql()
    }
}

impl<T: ToSql> ToSql for Option<T> {
    fn to_sql(&self) -> Value {
        match self {
            Some(value) => value.to_sql(),
            None => Value::Null,
        }
    }
}

impl FromSql for i32 {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        row.get::<_, i64>(index).map(|v| v as i32)
    }
}

impl FromSql for i64 {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        row.get(index)
    }
}

impl FromSql for u32 {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        row.get::<_, i64>(index).map(|v| v as u32)
    }
}

impl FromSql for u64 {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        row.get::<_, i64>(index).map(|v| v as u64)
    }
}

impl FromSql for bool {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        row.get::<_, i64>(index).map(|v| v == 1)
    }
}

impl FromSql for f64 {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        row.get(index)
    }
}

impl FromSql for String {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        row.get(index)
    }
}

impl FromSql for Vec<u8> {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        row.get(index)
    }
}

impl<T: FromSql> FromSql for Option<T> {
    fn from_sql(index: usize, row: &Row) -> rusqlite::Result<Self> {
        match row.get_ref(index)? {
            ValueRef::Null => Ok(None),
            _ => T::from_sql(index, row).map(Some),
        }
    }
}

/// Trait for types that can be used as a full set of SQL query parameters.
///
/// Implementations are provided for `()` (no parameters), any single
/// `ToSql` value, and tuples of up to 16 `ToSql` values.
pub trait Params {
    /// Converts `self` into the ordered list of bind values.
    fn into_values(self) -> Vec<Value>;
}

impl Params for () {
    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl<T: ToSql> Params for T {
    fn into_values(self) -> Vec<Value> {
        vec![self.to_sql()]
    }
}

macro_rules! single_tuple_impl {
    ($(($field:tt $ftype:ident)),* $(,)?) => {
        impl<$($ftype,)*> Params for ($($ftype,)*) where $($ftype: ToSql,)* {
            fn into_values(self) -> Vec<Value> {
                vec![$(self.$field.to_sql(),)*]
            }
        }

        impl<$($ftype,)*> FromRow for ($($ftype,)*) where $($ftype: FromSql,)* {
            fn from_row(row: &Row) -> rusqlite::Result<Self> {
                Ok(($($ftype::from_sql($field, row)?,)*))
            }
        }
    };
}

single_tuple_impl!((0 A));
single_tuple_impl!((0 A), (1 B));
single_tuple_impl!((0 A), (1 B), (2 C));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H), (8 I));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H), (8 I), (9 J));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H), (8 I), (9 J), (10 K));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H), (8 I), (9 J), (10 K), (11 L));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H), (8 I), (9 J), (10 K), (11 L), (12 M));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H), (8 I), (9 J), (10 K), (11 L), (12 M), (13 N));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H), (8 I), (9 J), (10 K), (11 L), (12 M), (13 N), (14 O));
single_tuple_impl!((0 A), (1 B), (2 C), (3 D), (4 E), (5 F), (6 G), (7 H), (8 I), (9 J), (10 K), (11 L), (12 M), (13 N), (14 O), (15 P));
