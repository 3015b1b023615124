use alloc::{borrow::Cow, vec::Vec};
use core::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    fmt,
    ops::{Deref, DerefMut, Index, IndexMut},
    slice::SliceIndex,
};

use crate::{ElementAllocator, SboVec};

impl<T, const N: usize, A: ElementAllocator> Deref for SboVec<T, N, A> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, const N: usize, A: ElementAllocator> DerefMut for SboVec<T, N, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, const N: usize, A: ElementAllocator> fmt::Debug for SboVec<T, N, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T, const N: usize, A: ElementAllocator> AsRef<[T]> for SboVec<T, N, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize, A: ElementAllocator> AsMut<[T]> for SboVec<T, N, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize, A: ElementAllocator> Borrow<[T]> for SboVec<T, N, A> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize, A: ElementAllocator> BorrowMut<[T]> for SboVec<T, N, A> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, const N: usize, A: ElementAllocator> Index<I> for SboVec<T, N, A> {
    type Output = I::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, const N: usize, A: ElementAllocator> IndexMut<I> for SboVec<T, N, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<'a, T, const N: usize, A: ElementAllocator> IntoIterator for &'a SboVec<T, N, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, const N: usize, A: ElementAllocator> IntoIterator for &'a mut SboVec<T, N, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: Ord, const N: usize, A: ElementAllocator> Ord for SboVec<T, N, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self.as_slice(), other.as_slice())
    }
}

impl<T, const N: usize, const P: usize, A, B> PartialOrd<SboVec<T, P, B>> for SboVec<T, N, A>
where
    T: PartialOrd,
    A: ElementAllocator,
    B: ElementAllocator,
{
    #[inline]
    fn partial_cmp(&self, other: &SboVec<T, P, B>) -> Option<Ordering> {
        PartialOrd::partial_cmp(self.as_slice(), other.as_slice())
    }
}

impl<T: Eq, const N: usize, A: ElementAllocator> Eq for SboVec<T, N, A> {}

impl<T, U, const N: usize, const P: usize, A, B> PartialEq<SboVec<U, P, B>> for SboVec<T, N, A>
where
    T: PartialEq<U>,
    A: ElementAllocator,
    B: ElementAllocator,
{
    #[inline]
    fn eq(&self, other: &SboVec<U, P, B>) -> bool {
        PartialEq::eq(self.as_slice(), other.as_slice())
    }
}

impl<T, U, const N: usize, A: ElementAllocator> PartialEq<[U]> for SboVec<T, N, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        PartialEq::eq(self.as_slice(), other)
    }
}

impl<T, U, const N: usize, A: ElementAllocator> PartialEq<&[U]> for SboVec<T, N, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        PartialEq::eq(self.as_slice(), *other)
    }
}

impl<T, U, const N: usize, const P: usize, A: ElementAllocator> PartialEq<[U; P]> for SboVec<T, N, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U; P]) -> bool {
        PartialEq::eq(self.as_slice(), other.as_slice())
    }
}

impl<T, U, const N: usize, const P: usize, A: ElementAllocator> PartialEq<&[U; P]> for SboVec<T, N, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U; P]) -> bool {
        PartialEq::eq(self.as_slice(), other.as_slice())
    }
}

impl<T, U, const N: usize, A: ElementAllocator> PartialEq<Vec<U>> for SboVec<T, N, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &Vec<U>) -> bool {
        PartialEq::eq(self.as_slice(), other.as_slice())
    }
}

impl<T, const N: usize, A: ElementAllocator + Default> Default for SboVec<T, N, A> {
    #[inline]
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, const N: usize, A: ElementAllocator> Extend<T> for SboVec<T, N, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: 'a + Clone, const N: usize, A: ElementAllocator> Extend<&'a T> for SboVec<T, N, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, const N: usize, A: ElementAllocator + Default> FromIterator<T> for SboVec<T, N, A> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, A::default())
    }
}

impl<T, const N: usize, const P: usize, A: ElementAllocator + Default> From<[T; P]> for SboVec<T, N, A> {
    /// Stays inline when `P <= N`.
    fn from(arr: [T; P]) -> Self {
        let mut vec = Self::with_capacity_in(P, A::default());
        vec.extend(arr);
        vec
    }
}

impl<T: Clone, const N: usize, A: ElementAllocator + Default> From<&[T]> for SboVec<T, N, A> {
    fn from(slice: &[T]) -> Self {
        let mut vec = Self::new_in(A::default());
        vec.extend_from_slice(slice);
        vec
    }
}

impl<T, const N: usize, A: ElementAllocator + Default> From<Vec<T>> for SboVec<T, N, A> {
    /// Keeps the heap buffer, whatever its length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::SboVec;
    /// let vec: SboVec<i32, 4> = SboVec::from(vec![1, 2]);
    /// assert!(!vec.is_inline());
    /// ```
    fn from(vec: Vec<T>) -> Self {
        Self::from_vec_in(vec, A::default())
    }
}

impl<T, const N: usize, A: ElementAllocator> From<SboVec<T, N, A>> for Vec<T> {
    #[inline]
    fn from(vec: SboVec<T, N, A>) -> Self {
        vec.into_vec()
    }
}

impl<'a, T: Clone, const N: usize, A: ElementAllocator> From<SboVec<T, N, A>> for Cow<'a, [T]> {
    fn from(vec: SboVec<T, N, A>) -> Self {
        Cow::Owned(vec.into_vec())
    }
}
