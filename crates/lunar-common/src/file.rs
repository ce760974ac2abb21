//! File identity.

/// A unique identifier for a source file known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub u32);

/// A value paired with the file it was found in.
///
/// Syntax nodes carry offsets but not file identity, so anything that
/// crosses a file boundary (name resolution, `require` targets) travels
/// wrapped in `InFile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InFile<T> {
    pub file_id: FileId,
    pub value: T,
}

impl<T> InFile<T> {
    pub fn new(file_id: FileId, value: T) -> Self {
        InFile { file_id, value }
    }

    /// Keep the file, replace the value.
    pub fn with_value<U>(&self, value: U) -> InFile<U> {
        InFile::new(self.file_id, value)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> InFile<U> {
        InFile::new(self.file_id, f(self.value))
    }

    pub fn as_ref(&self) -> InFile<&T> {
        self.with_value(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_value_keeps_file() {
        let a = InFile::new(FileId(3), "x");
        let b = a.with_value(42);
        assert_eq!(b.file_id, FileId(3));
        assert_eq!(b.value, 42);
    }

    #[test]
    fn map_and_as_ref() {
        let a = InFile::new(FileId(1), String::from("abc"));
        assert_eq!(a.as_ref().value.len(), 3);
        let len = a.map(|s| s.len());
        assert_eq!(len, InFile::new(FileId(1), 3));
    }
}
