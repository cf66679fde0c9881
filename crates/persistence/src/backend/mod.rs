// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific code.
//!
//! Connection setup, migrations and the few statements Diesel has no DSL
//! for live here. Everything else is plain Diesel DSL in the store modules.

pub mod sqlite;
