// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Index newtypes for records.
//!
//! A [`RecordId`] is the record's position in the fetched sequence and never
//! changes for the life of a session. A [`DisplayRow`] is a position in the
//! currently visible (filtered) sequence and is only meaningful against the
//! projection it was taken from. The two do not convert into each other;
//! resolve through [`crate::VisibleRows::resolve`].

macro_rules! index_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            pub const fn new(value: usize) -> Self {
                Self(value)
            }

            pub const fn get(self) -> usize {
                self.0
            }
        }
    };
}

index_id!(RecordId);
index_id!(DisplayRow);
