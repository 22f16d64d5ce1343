/// Formula file decoding
///
/// Parses the competition property XML (`<property-set>` with one
/// `<property>` per query) into [`Query`] values. Query order in the output
/// equals declaration order in the file; the report driver relies on it for
/// slot indices.
use crate::config::types::{ReportError, Result};
use crate::formula::ast::{Expr, Formula, Query};
use roxmltree::{Document, Node};

/// Decode the contents of one formula file.
pub fn decode_queries(xml: &str) -> Result<Vec<Query>> {
    let doc = Document::parse(xml).map_err(|e| ReportError::Decode(e.to_string()))?;
    let root = doc.root_element();
    if root.tag_name().name() != "property-set" {
        return Err(ReportError::Decode(format!(
            "expected <property-set> root, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut queries = Vec::new();
    for property in elements(root) {
        if property.tag_name().name() != "property" {
            continue;
        }
        queries.push(decode_property(property)?);
    }
    Ok(queries)
}

fn decode_property(property: Node) -> Result<Query> {
    let id = child_named(property, "id")
        .and_then(|n| n.text())
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let formula_node = child_named(property, "formula")
        .ok_or_else(|| ReportError::Decode(format!("property {:?} has no <formula>", id)))?;
    let quantified = single_element(formula_node, &id)?;

    // The path quantifier fixes the query's polarity; the body under
    // finally/globally is plain boolean structure.
    let (is_ef, modality_tag) = match quantified.tag_name().name() {
        "exists-path" => (true, "finally"),
        "all-paths" => (false, "globally"),
        other => {
            return Err(ReportError::Decode(format!(
                "property {:?}: unsupported path quantifier <{}>",
                id, other
            )))
        }
    };

    let modality = single_element(quantified, &id)?;
    if modality.tag_name().name() != modality_tag {
        return Err(ReportError::Decode(format!(
            "property {:?}: expected <{}> under <{}>, found <{}>",
            id,
            modality_tag,
            quantified.tag_name().name(),
            modality.tag_name().name()
        )));
    }

    let formula = decode_formula(single_element(modality, &id)?, &id)?;
    Ok(Query { id, formula, is_ef })
}

fn decode_formula(node: Node, id: &str) -> Result<Formula> {
    match node.tag_name().name() {
        "true" => Ok(Formula::Constant(true)),
        "false" => Ok(Formula::Constant(false)),
        "negation" => Ok(Formula::Not(Box::new(decode_formula(
            single_element(node, id)?,
            id,
        )?))),
        "conjunction" => Ok(Formula::And(
            elements(node)
                .map(|n| decode_formula(n, id))
                .collect::<Result<Vec<_>>>()?,
        )),
        "disjunction" => Ok(Formula::Or(
            elements(node)
                .map(|n| decode_formula(n, id))
                .collect::<Result<Vec<_>>>()?,
        )),
        "is-fireable" => {
            let transitions = elements(node)
                .filter(|n| n.tag_name().name() == "transition")
                .filter_map(|n| n.text())
                .map(|t| t.trim().to_string())
                .collect();
            Ok(Formula::IsFireable(transitions))
        }
        "integer-le" => {
            let mut operands = elements(node);
            let lhs = operands.next().ok_or_else(|| {
                ReportError::Decode(format!("property {:?}: <integer-le> missing operands", id))
            })?;
            let rhs = operands.next().ok_or_else(|| {
                ReportError::Decode(format!("property {:?}: <integer-le> missing operand", id))
            })?;
            Ok(Formula::LessThanEq(
                decode_expr(lhs, id)?,
                decode_expr(rhs, id)?,
            ))
        }
        other => Err(ReportError::Decode(format!(
            "property {:?}: unsupported formula element <{}>",
            id, other
        ))),
    }
}

fn decode_expr(node: Node, id: &str) -> Result<Expr> {
    match node.tag_name().name() {
        "integer-constant" => {
            let text = node.text().unwrap_or("").trim();
            text.parse::<i64>().map(Expr::Constant).map_err(|_| {
                ReportError::Decode(format!(
                    "property {:?}: invalid integer constant {:?}",
                    id, text
                ))
            })
        }
        "tokens-count" => {
            let places = elements(node)
                .filter(|n| n.tag_name().name() == "place")
                .filter_map(|n| n.text())
                .map(|p| p.trim().to_string())
                .collect();
            Ok(Expr::TokensCount(places))
        }
        "integer-sum" => Ok(Expr::Sum(
            elements(node)
                .map(|n| decode_expr(n, id))
                .collect::<Result<Vec<_>>>()?,
        )),
        other => Err(ReportError::Decode(format!(
            "property {:?}: unsupported integer expression <{}>",
            id, other
        ))),
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn child_named<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    elements(node).find(|n| n.tag_name().name() == name)
}

fn single_element<'a, 'input>(node: Node<'a, 'input>, id: &str) -> Result<Node<'a, 'input>> {
    let mut it = elements(node);
    let first = it.next().ok_or_else(|| {
        ReportError::Decode(format!(
            "property {:?}: <{}> has no child element",
            id,
            node.tag_name().name()
        ))
    })?;
    if it.next().is_some() {
        return Err(ReportError::Decode(format!(
            "property {:?}: <{}> has more than one child element",
            id,
            node.tag_name().name()
        )));
    }
    Ok(first)
}
