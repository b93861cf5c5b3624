// WIC - wic-runtime
// Module: Indirect call tables
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Tables of callee references consulted by `call_indirect`.

use alloc::{sync::Arc, vec::Vec};
use core::{fmt, num::NonZeroUsize};

use wic_error::{Error, Result};

use crate::types::FuncType;

/// Entry address of compiled guest code. Never null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalleeAddr(NonZeroUsize);

impl CalleeAddr {
    /// Wraps a raw address; `None` for null.
    #[must_use]
    pub const fn new(addr: usize) -> Option<Self> {
        match NonZeroUsize::new(addr) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// The raw address.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for CalleeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0.get())
    }
}

/// One table slot: a callee and the type it was defined with.
///
/// Either half may be missing. A slot without a callee is unfilled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableElement {
    callee: Option<CalleeAddr>,
    ty:     Option<Arc<FuncType>>,
}

impl TableElement {
    /// An unfilled slot.
    pub const EMPTY: Self = Self { callee: None, ty: None };

    /// A filled slot.
    #[must_use]
    pub const fn new(callee: CalleeAddr, ty: Arc<FuncType>) -> Self {
        Self { callee: Some(callee), ty: Some(ty) }
    }

    /// A slot built from raw parts, either of which may be absent.
    #[must_use]
    pub const fn from_parts(callee: Option<CalleeAddr>, ty: Option<Arc<FuncType>>) -> Self {
        Self { callee, ty }
    }

    /// The callee, if the slot is filled.
    #[must_use]
    pub const fn callee(&self) -> Option<CalleeAddr> {
        self.callee
    }

    /// The type recorded for the callee.
    #[must_use]
    pub fn func_type(&self) -> Option<&FuncType> {
        self.ty.as_deref()
    }
}

/// A dense, zero-indexed sequence of [`TableElement`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    elements: Vec<TableElement>,
}

impl Table {
    /// Creates a table of `size` unfilled slots.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self { elements: alloc::vec![TableElement::EMPTY; size as usize] }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the table has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The slot at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&TableElement> {
        self.elements.get(index as usize)
    }

    /// Replaces the slot at `index`.
    pub fn set(&mut self, index: u32, element: TableElement) -> Result<()> {
        let slot = self
            .elements
            .get_mut(index as usize)
            .ok_or(Error::table_out_of_bounds("Table index out of bounds"))?;
        *slot = element;
        Ok(())
    }

    /// Appends `count` unfilled slots and returns the previous length.
    pub fn grow(&mut self, count: u32) -> Result<u32> {
        let old = u32::try_from(self.elements.len())
            .map_err(|_| Error::table_out_of_bounds("Table length exceeds u32"))?;
        let new_len = old
            .checked_add(count)
            .ok_or(Error::table_out_of_bounds("Table length exceeds u32"))?;
        self.elements
            .try_reserve(count as usize)
            .map_err(|_| Error::ALLOCATION_FAILED)?;
        self.elements.resize(new_len as usize, TableElement::EMPTY);
        Ok(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueType;

    #[test]
    fn test_null_address_is_rejected() {
        assert!(CalleeAddr::new(0).is_none());
        assert_eq!(CalleeAddr::new(0x1000).map(CalleeAddr::get), Some(0x1000));
    }

    #[test]
    fn test_set_get_grow() {
        let ty = Arc::new(FuncType::new([ValueType::I32], []).unwrap());
        let mut table = Table::new(2);
        assert_eq!(table.get(0), Some(&TableElement::EMPTY));
        assert!(table.get(2).is_none());

        let callee = CalleeAddr::new(0x40).unwrap();
        table.set(1, TableElement::new(callee, Arc::clone(&ty))).unwrap();
        assert_eq!(table.get(1).and_then(TableElement::callee), Some(callee));
        assert_eq!(table.get(1).and_then(TableElement::func_type), Some(&*ty));

        assert!(table.set(2, TableElement::EMPTY).is_err());
        assert_eq!(table.grow(3).unwrap(), 2);
        assert_eq!(table.len(), 5);
        assert!(table.set(4, TableElement::EMPTY).is_ok());
    }
}
