use std::fmt::Debug;

/// Growable list with an explicit element count, used as a worklist stack.
///
/// Slots past `elements` stay allocated, so popping never shrinks storage.
#[derive(Clone, Debug)]
pub(crate) struct List<T>
    where T: Copy + Clone + Debug
{
    data: Vec<T>,
    elements: usize,
}

impl<T> List<T>
    where
        T: Copy + Debug + Default,
{
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(128)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut data = Vec::new();
        data.resize(capacity, T::default());
        Self {
            data,
            elements: 0,
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.elements
    }

    pub(crate) fn push(&mut self, element: T) -> usize {
        if self.elements == self.data.len() {
            let new_cap = (self.elements + 1) * 2;
            self.data.resize(new_cap, T::default());
        }
        let index = self.elements;
        self.elements += 1;
        self.data[index] = element;
        index
    }

    pub(crate) fn pop(&mut self) -> T {
        debug_assert!(self.elements > 0);
        self.elements -= 1;
        self.data[self.elements]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_is_lifo() {
        let mut list = List::<u32>::with_capacity(1);
        assert_eq!(list.push(1), 0);
        assert_eq!(list.push(2), 1);
        assert_eq!(list.push(3), 2);
        assert_eq!(list.size(), 3);
        assert_eq!(list.pop(), 3);
        assert_eq!(list.pop(), 2);
        assert_eq!(list.pop(), 1);
        assert_eq!(list.size(), 0);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut list = List::<u16>::new();
        for i in 0..500 {
            assert_eq!(list.push(i), i as usize);
        }
        assert_eq!(list.size(), 500);
        assert_eq!(list.pop(), 499);
    }

    #[test]
    fn zero_capacity_list_still_grows() {
        let mut list = List::<u8>::with_capacity(0);
        list.push(9);
        assert_eq!(list.size(), 1);
        assert_eq!(list.pop(), 9);
    }
}
