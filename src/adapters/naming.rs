use crate::domain::ports::GenericsNormalizer;

/// Default generics normalizer: deletes every balanced `<...>` span.
///
/// Nesting is tracked, so `Map<K,List<V>>` becomes `Map`. A stray `>` outside
/// any span is kept; an unterminated `<` swallows the rest of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleBracketStripper;

impl GenericsNormalizer for AngleBracketStripper {
    fn remove_generics(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut depth = 0usize;
        for c in s.chars() {
            match c {
                '<' => depth += 1,
                '>' if depth > 0 => depth -= 1,
                _ if depth == 0 => out.push(c),
                _ => {}
            }
        }
        out
    }
}
