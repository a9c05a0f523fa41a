// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

pub mod an;
pub mod constant;
pub mod cv;
pub mod error;
pub mod im;
pub mod ut;
