use jcst_lex::lex;
use jcst_parse::{parse_expression_source, parse_source};
use jcst_syntax::{Element, NodeKind};
use miette::{miette, Result};
use proptest::{
    prelude::{any, prop},
    prop_assert, prop_assert_eq,
    test_runner::{Config, TestCaseError, TestRunner},
};

const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "<<", ">>", ">>>", "<", ">", "<=", ">=", "==", "!=", "&", "^", "|", "&&", "||",
];

/// Statements that parse cleanly on their own.
const STATEMENTS: &[&str] = &[
    "x = 1;",
    "foo(a, b);",
    "int y = (int) z;",
    "if (a) { b(); } else c();",
    "List<String> l = new ArrayList<>();",
    "for (String s : xs) use(s);",
    "return;",
    "i++;",
    "a.b[0].c();",
    "Runnable r = () -> {};",
    "y = a < b ? c : d;",
    "z = (Foo) bar;",
    "w >>= 2;",
    "m(List<String>::new);",
];

/// Statements plus stray tokens that force recovery.
const FRAGMENTS: &[&str] = &[
    "x = 1;", "foo(a, b);", "int y = (int) z;", "List<String> l;", "a < b;", "(", ")", "{", "}", ";", "else",
    "+", "new", "int", "=", ",", "case 1:", "try {", "catch", ".", "::", "->", "?", "<", ">",
];

fn failure(err: impl std::fmt::Debug) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

#[test]
fn same_level_chains_fold_left() -> Result<()> {
    let mut runner = TestRunner::new(Config {
        cases: 128,
        ..Config::default()
    });
    let strat = (
        prop::collection::vec(any::<u16>(), 2..16),
        prop::sample::select(OPERATORS.to_vec()),
    );

    runner
        .run(&strat, |(operands, op)| {
            let src = operands
                .iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(&format!(" {op} "));
            let parse = parse_expression_source(&src).map_err(failure)?;
            prop_assert!(parse.is_ok(), "{}: {:?}", src, parse.errors);

            // Every operator node keeps a literal on its right; the chain
            // grows down the left spine.
            let mut node = parse.root.child(0).and_then(Element::as_node).ok_or_else(|| failure("no expression"))?;
            let mut folds = 0;
            while node.kind() != NodeKind::Literal {
                let right = node.children().last().and_then(Element::node_kind);
                prop_assert_eq!(right, Some(NodeKind::Literal));
                node = node.child(0).and_then(Element::as_node).ok_or_else(|| failure("no left operand"))?;
                folds += 1;
            }
            prop_assert_eq!(folds, operands.len() - 1);
            Ok(())
        })
        .map_err(|e| miette!("{e}"))?;
    Ok(())
}

#[test]
fn valid_statement_sequences_parse_cleanly() -> Result<()> {
    let mut runner = TestRunner::new(Config {
        cases: 128,
        ..Config::default()
    });
    let strat = prop::collection::vec(prop::sample::select(STATEMENTS.to_vec()), 0..10);

    runner
        .run(&strat, |stmts| {
            let src = format!("class A {{ void m() {{ {} }} }}", stmts.join(" "));
            let parse = parse_source(&src).map_err(failure)?;
            prop_assert!(parse.is_ok(), "{}: {:?}", src, parse.errors);
            let block = parse.root.first(NodeKind::Block).ok_or_else(|| failure("no body"))?;
            prop_assert_eq!(block.child_nodes().count(), stmts.len());
            Ok(())
        })
        .map_err(|e| miette!("{e}"))?;
    Ok(())
}

#[test]
fn every_token_survives_recovery() -> Result<()> {
    let mut runner = TestRunner::new(Config {
        cases: 256,
        ..Config::default()
    });
    let strat = prop::collection::vec(prop::sample::select(FRAGMENTS.to_vec()), 0..16);

    runner
        .run(&strat, |fragments| {
            let src = format!("class A {{ void m() {{ {} }} }}", fragments.join(" "));
            let tokens = lex(&src).map_err(failure)?;
            let parse = parse_source(&src).map_err(failure)?;

            let expected: Vec<_> = tokens.iter().map(|t| (t.kind, t.start())).collect();
            let actual: Vec<_> = parse.root.tokens().map(|t| (t.kind, t.start())).collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(parse.root.kind(), NodeKind::CompilationUnit);
            Ok(())
        })
        .map_err(|e| miette!("{e}"))?;
    Ok(())
}
