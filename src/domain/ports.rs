/// Generics removal port (implemented by Infrastructure or supplied by the host)
///
/// Takes a Java-ish signature fragment and returns it with every generic type
/// argument list removed, e.g. `List<String>` → `List`.
pub trait GenericsNormalizer: Send + Sync {
    fn remove_generics(&self, s: &str) -> String;
}

impl<F> GenericsNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn remove_generics(&self, s: &str) -> String {
        self(s)
    }
}
