use std::{
    fmt,
    iter::FromIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use stable_vec::{
    StableVec,
    core::DefaultCore,
    iter::{Indices, Iter as SvIter, Values as SvValues},
};

use crate::handle::{hsize, Handle};
use super::{PropStore, PropStoreMut};


/// A property map that uses a simple contiguous vector to store the
/// properties.
///
///
/// # Memory requirements and use cases
///
/// This data structure's memory requirement doesn't grow with the number of
/// elements stored inside this map, but rather with the highest handle ID. The
/// handle is simply used as an index into the underlying vector. This has two
/// important consequences:
///
/// - **Good**: this map usually has the best access times since it just is
///   just an array lookup.
/// - **Bad**: if you don't pay attention, you could waste a lot of memory with
///   this map and subsequently lose the speed advantage.
///
/// All meshes in this crate produce handles with sequentially increasing IDs.
/// So if you add three vertices to a mesh, the handles of those vertices will
/// have the IDs 0, 1 and 2. If you want to associate data with (almost) all
/// of those handles, this map is the best choice. The mesh itself uses it as
/// arena for its records.
///
/// # Example
///
/// ```
/// use loopmesh::{
///     FaceHandle,
///     handle::Handle,
///     map::{PropStore, PropStoreMut, DenseMap},
/// };
///
///
/// let mut map = DenseMap::new();
///
/// let f0 = FaceHandle::from_usize(0);
/// assert_eq!(map.get_ref(f0), None);
/// map.insert(f0, "bob");
/// assert_eq!(map.get_ref(f0), Some(&"bob"));
///
/// // Note that after this insert operation, the `DenseMap` has allocated memory
/// // for 6 elements (2 of which are used).
/// let f5 = FaceHandle::from_usize(5);
/// map.insert(f5, "lena");
/// assert_eq!(map[f5], "lena");
/// ```
#[derive(Clone)]
pub struct DenseMap<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> DenseMap<H, T> {
    /// Creates an empty `DenseMap`.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    /// Creates an empty `DenseMap` with memory for `cap` many properties.
    pub fn with_capacity(cap: hsize) -> Self {
        Self {
            vec: StableVec::with_capacity(cap as usize),
            _dummy: PhantomData,
        }
    }

    /// Adds `elem` at the next free handle after the last used one and
    /// returns that handle. This is how the mesh allocates new records.
    pub fn push(&mut self, elem: T) -> H {
        H::from_usize(self.vec.push(elem))
    }

    /// Returns the handle that the next call to `push` will return.
    pub fn next_push_handle(&self) -> H {
        H::from_usize(self.vec.next_push_index())
    }

    pub fn num_elements(&self) -> hsize {
        self.vec.num_elements() as hsize
    }

    pub fn iter(&self) -> Iter<'_, H, T> {
        Iter {
            iter: self.vec.iter(),
            _dummy: PhantomData,
        }
    }

    /// Returns an iterator over all handles with a property, in increasing
    /// order.
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles {
            iter: self.vec.indices(),
            _dummy: PhantomData,
        }
    }

    pub fn values(&self) -> Values<'_, H, T> {
        Values {
            iter: self.vec.values(),
            _dummy: PhantomData,
        }
    }
}

impl<H: Handle, T> Default for DenseMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> PropStore<H> for DenseMap<H, T> {
    type Target = T;

    fn get_ref(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
    }

    fn contains_handle(&self, handle: H) -> bool {
        self.vec.has_element_at(handle.to_usize())
    }

    fn num_props(&self) -> hsize {
        self.vec.num_elements() as hsize
    }
}

impl<H: Handle, T> PropStoreMut<H> for DenseMap<H, T> {
    fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
    }

    fn insert(&mut self, handle: H, elem: T) -> Option<T> {
        let idx = handle.to_usize();
        self.vec.reserve_for(idx);
        self.vec.insert(idx, elem)
    }

    fn clear(&mut self) {
        self.vec.clear()
    }

    fn reserve(&mut self, additional: hsize) {
        self.vec.reserve(additional as usize);
    }
}

impl<H: Handle, T> Index<H> for DenseMap<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get_ref(handle) {
            None => panic!("no property found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for DenseMap<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no property found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for DenseMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.iter())
            .finish()
    }
}

impl<H: Handle, T> Extend<(H, T)> for DenseMap<H, T> {
    fn extend<I: IntoIterator<Item = (H, T)>>(&mut self, iter: I) {
        // We use the same strategy as the std `HashMap`: since keys may be
        // already present or show multiple times in the iterator, we don't
        // necessarily want to reserve too much.
        let iter = iter.into_iter();
        let cap = if self.is_empty() {
            iter.size_hint().0
        } else {
            (iter.size_hint().0 + 1) / 2
        };
        self.reserve(cap as hsize);

        for (handle, value) in iter {
            self.insert(handle, value);
        }
    }
}

impl<H: Handle, T> FromIterator<(H, T)> for DenseMap<H, T> {
    fn from_iter<I: IntoIterator<Item = (H, T)>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}


// ===== Iterator wrappers =======================================================================

#[derive(Debug)]
pub struct Iter<'map, H: Handle, T> {
    iter: SvIter<'map, T, DefaultCore<T>>,
    _dummy: PhantomData<H>,
}

impl<'map, H: Handle, T> Iterator for Iter<'map, H, T> {
    type Item = (H, &'map T);
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(i, e)| (H::from_usize(i), e))
    }
}

#[derive(Debug)]
pub struct Handles<'map, H: Handle, T> {
    iter: Indices<'map, T, DefaultCore<T>>,
    _dummy: PhantomData<H>,
}

impl<'map, H: Handle, T> Iterator for Handles<'map, H, T> {
    type Item = H;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(H::from_usize)
    }
}

#[derive(Debug)]
pub struct Values<'map, H: Handle, T> {
    iter: SvValues<'map, T, DefaultCore<T>>,
    _dummy: PhantomData<H>,
}

impl<'map, H: Handle, T> Iterator for Values<'map, H, T> {
    type Item = &'map T;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}


// ===== Tests ===================================================================================
