use std::collections::HashSet;

use crate::math::ast::AstNode;

/// Extracts the names of all quantities an expression reads.
///
/// The tree is walked in pre-order over every node and all of its children,
/// including arguments of nested function applications. Every symbol node
/// contributes its name once; the first occurrence determines the position in
/// the result.
///
/// # Arguments
///
/// * `expression` - The expression tree, or `None` if the math is unset.
///
/// # Returns
///
/// Returns the symbol names in order of first appearance. An absent
/// expression yields an empty vector.
pub fn extract_read_variables(expression: Option<&AstNode>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut symbols = Vec::new();
    let mut pending: Vec<&AstNode> = expression.into_iter().collect();

    while let Some(node) = pending.pop() {
        if let AstNode::Symbol(name) = node {
            if seen.insert(name.as_str()) {
                symbols.push(name.clone());
            }
        }

        // Reversed so that the leftmost child is visited next
        pending.extend(node.children().iter().rev());
    }

    symbols
}

/// Extracts symbols (variables) from the given math string.
///
/// # Arguments
///
/// * `math` - Infix math string.
///
/// # Returns
///
/// Returns the symbol names or the parse error of the math string.
pub fn extract_symbols(math: &str) -> Result<Vec<String>, crate::math::error::MathError> {
    let ast = AstNode::parse(math)?;
    Ok(extract_read_variables(Some(&ast)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_expression() {
        assert!(extract_read_variables(None).is_empty());
    }

    #[test]
    fn test_extract_symbols_in_order() {
        let symbols = extract_symbols("A * B + A / C").expect("Failed to extract");
        assert_eq!(symbols, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_extract_nested_function_arguments() {
        let symbols = extract_symbols("k1 * exp(-max(S, P) / K)").expect("Failed to extract");
        assert_eq!(symbols, vec!["k1", "S", "P", "K"]);
    }

    #[test]
    fn test_function_names_are_not_symbols() {
        let symbols = extract_symbols("exp(2)").expect("Failed to extract");
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_long_sum() {
        let math = (0..20_000)
            .map(|i| format!("x{i}"))
            .collect::<Vec<_>>()
            .join(" + ");
        let symbols = extract_symbols(&math).expect("Failed to extract");

        assert_eq!(symbols.len(), 20_000);
        assert_eq!(symbols.first().map(String::as_str), Some("x0"));
        assert_eq!(symbols.last().map(String::as_str), Some("x19999"));
    }

    #[test]
    fn test_literals_only() {
        let symbols = extract_symbols("2 + 3 * 4").expect("Failed to extract");
        assert!(symbols.is_empty());
    }
}
