//! Indentation of single-line S-expressions.
//!
//! Tree-sitter serializes a tree as one line of whitespace separated tokens
//! where `(` and `)` only appear at token boundaries, e.g.
//! `(module (function foo) (function bar))`. The functions here put every
//! token on its own line, indented by the number of groups that are still
//! open before it.

/// Indentation width used by [`indent`].
pub const DEFAULT_SPACES: usize = 2;

/// Indents `expression` by [`DEFAULT_SPACES`] per nesting level.
///
/// ```text
/// (module (function foo) (function bar))
/// ```
///
/// becomes
///
/// ```text
/// (module
///   (function
///     foo)
///   (function
///     bar))
/// ```
pub fn indent(expression: &str) -> String {
    indent_by(DEFAULT_SPACES, expression)
}

/// Indents `expression` by `spaces` per nesting level.
///
/// Empty or whitespace-only input gives an empty string. Unbalanced input
/// never fails: surplus close markers are dropped once the depth reaches
/// zero, unclosed groups leave the remaining tokens indented.
pub fn indent_by(spaces: usize, expression: &str) -> String {
    let mut output = String::with_capacity(expression.len() * 2);
    for (i, (depth, token)) in lines(expression).enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.extend(std::iter::repeat_n(' ', depth * spaces));
        output.push_str(token);
    }
    output
}

/// Yields every token together with the depth it is rendered at.
///
/// The depth of a token is the net number of `(` minus `)` over all tokens
/// strictly before it, saturating at zero.
pub fn lines(expression: &str) -> impl Iterator<Item = (usize, &str)> {
    expression.split_whitespace().scan(0usize, |depth, token| {
        let current = *depth;
        *depth = (*depth + opens(token)).saturating_sub(closes(token));
        Some((current, token))
    })
}

fn opens(token: &str) -> usize {
    token.bytes().filter(|&b| b == b'(').count()
}

fn closes(token: &str) -> usize {
    token.bytes().filter(|&b| b == b')').count()
}
