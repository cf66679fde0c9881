// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One module per group of tables, each implementing `Entity` for the
//! domain records it stores.

pub mod contracts;
pub mod documents;
pub mod lookups;
pub mod parties;
pub mod progress;
pub mod records;
