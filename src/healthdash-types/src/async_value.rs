/// Progress of a value that is fetched asynchronously.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AsyncValue<T, E> {
    #[default]
    Uninitialized,
    Loading,
    Success(T),
    Failure(E),
}

impl<T, E> AsyncValue<T, E> {
    /// The payload, if the fetch succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            AsyncValue::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            AsyncValue::Failure(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_uninitialized(&self) -> bool {
        matches!(self, AsyncValue::Uninitialized)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncValue::Loading)
    }

    /// True once the value is either a success or a failure.
    pub fn is_complete(&self) -> bool {
        matches!(self, AsyncValue::Success(_) | AsyncValue::Failure(_))
    }

    pub fn map<U, F>(self, f: F) -> AsyncValue<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            AsyncValue::Uninitialized => AsyncValue::Uninitialized,
            AsyncValue::Loading => AsyncValue::Loading,
            AsyncValue::Success(value) => AsyncValue::Success(f(value)),
            AsyncValue::Failure(error) => AsyncValue::Failure(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for AsyncValue<T, E> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => AsyncValue::Success(value),
            Err(error) => AsyncValue::Failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AsyncValue;

    #[test]
    fn default_is_uninitialized() {
        let value: AsyncValue<bool, String> = AsyncValue::default();
        assert!(value.is_uninitialized());
        assert!(!value.is_complete());
        assert_eq!(value.value(), None);
    }

    #[test]
    fn from_result() {
        let ok: AsyncValue<u32, String> = Ok(3).into();
        assert_eq!(ok.value(), Some(&3));
        assert!(ok.is_complete());

        let err: AsyncValue<u32, String> = Err("boom".to_owned()).into();
        assert_eq!(err.error().map(String::as_str), Some("boom"));
        assert!(err.is_complete());
    }

    #[test]
    fn map_keeps_state() {
        let loading: AsyncValue<u32, ()> = AsyncValue::Loading;
        assert!(loading.map(|v| v * 2).is_loading());

        let done: AsyncValue<u32, ()> = AsyncValue::Success(21);
        assert_eq!(done.map(|v| v * 2), AsyncValue::Success(42));
    }
}
