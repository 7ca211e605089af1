pub trait NonEmptyExtension {
    fn non_empty(self) -> Option<String>;
}

impl NonEmptyExtension for Option<String> {
    fn non_empty(self) -> Option<String> {
        match self {
            Some(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}
