use crate::HasLength;
use std::borrow::Cow;

impl HasLength for str {
  fn length(&self) -> usize {
    self.chars().count()
  }
}

impl HasLength for String {
  fn length(&self) -> usize {
    self.as_str().length()
  }
}

impl<'a> HasLength for Cow<'a, str> {
  fn length(&self) -> usize {
    self.as_ref().length()
  }
}

impl<T: HasLength + ?Sized> HasLength for &T {
  fn length(&self) -> usize {
    (**self).length()
  }
}

impl<T> HasLength for [T] {
  fn length(&self) -> usize {
    self.len()
  }
}

impl<T> HasLength for Vec<T> {
  fn length(&self) -> usize {
    self.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_str_length_counts_chars() {
    assert_eq!("förmé".length(), 5);
    assert_eq!(String::from("abc").length(), 3);
    assert_eq!(vec![1, 2].length(), 2);
  }
}
