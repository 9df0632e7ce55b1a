/// Computes the name of the `index`-th generated function.
///
/// `"test"` + `original` with its first character upper-cased + `"_"` + `index`.
///
/// ```rust
/// use paramtest::macros::generated_name;
/// assert_eq!(generated_name("f", 1), "testF_1");
/// assert_eq!(generated_name("assertWithTuple", 0), "testAssertWithTuple_0");
/// ```
pub fn generated_name(original: &str, index: usize) -> String {
    let mut chars = original.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("test{}_{}", capitalized, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_character_changes() {
        assert_eq!(generated_name("assertNumber", 0), "testAssertNumber_0");
        assert_eq!(generated_name("Already", 3), "testAlready_3");
        assert_eq!(generated_name("_private", 2), "test_private_2");
        assert_eq!(generated_name("éclair", 10), "testÉclair_10");
    }
}
