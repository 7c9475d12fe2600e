use std::thread;

use jcst_lex::lex;
use jcst_parse::{parse_expression_source, parse_source, Parse, SyntaxErrorKind};
use jcst_syntax::{walk, Listener, Node, NodeKind, Span, Token, TokenKind};

/// Token kinds and offsets as the lexer produced them.
fn lexed(src: &str) -> Vec<(TokenKind, usize)> {
    lex(src).unwrap().iter().map(|t| (t.kind, t.start())).collect()
}

fn in_tree(root: &Node<'_>) -> Vec<(TokenKind, usize)> {
    root.tokens().map(|t| (t.kind, t.start())).collect()
}

fn statements<'a, 'src>(parse: &'a Parse<'src>) -> Vec<&'a Node<'src>> {
    let block = parse.root.first(NodeKind::Block).expect("method body");
    block.child_nodes().collect()
}

/// Runs `f` on a thread with a main-thread sized stack.
fn with_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn tree_reproduces_token_stream() {
    let src = r#"
package p;
import java.util.List;
class A<T> extends B implements C, D {
    int[] xs = {1, 2}, ys;
    A() { super(); }
    <R> R map(Function<? super T, ? extends R> f) throws E1, E2 { return f.apply(t); }
    void m() {
        List<List<String>> l = new ArrayList<>();
        label: for (;;) { if (x >>> 2 > y) break label; }
        int v = cond ? (int) d : ~k << 3;
        Runnable r = () -> System.out.println(this.name + "!");
    }
}
"#;
    let parse = parse_source(src).unwrap();
    assert!(parse.is_ok(), "{:?}", parse.errors);
    assert_eq!(in_tree(&parse.root), lexed(src));
}

#[test]
fn javadoc_and_block_comments_are_trivia() {
    let src = r#"
/**
 * Holds a value.
 * @author nobody
 */
class A {
    /* field */ int x = 0b1010;
    /** Does nothing. */
    void m() { int y = x /* inline */ / 2; }
    /***/ int z;
}
"#;
    let parse = parse_source(src).unwrap();
    assert!(parse.is_ok(), "{:?}", parse.errors);
    assert_eq!(in_tree(&parse.root), lexed(src));
    let kinds: Vec<NodeKind> = parse.root.child_nodes().map(Node::kind).collect();
    assert_eq!(kinds, vec![NodeKind::NormalClassDeclaration]);
}

#[test]
fn tree_reproduces_token_stream_after_errors() {
    let src = "class A { void m() { int = 5; foo(1 2; x = ; } int y }";
    let parse = parse_source(src).unwrap();
    assert!(!parse.is_ok());
    assert_eq!(in_tree(&parse.root), lexed(src));
}

#[test]
fn malformed_statement_stays_local() {
    let src = "class A { void m() { int a = 1; int b = ; int c = 3; } }";
    let parse = parse_source(src).unwrap();
    assert_eq!(parse.errors.len(), 1, "{:?}", parse.errors);
    assert!(matches!(
        parse.errors[0].kind,
        SyntaxErrorKind::NoViableAlternative { rule: "primary", found: TokenKind::Semi }
    ));

    let stmts = statements(&parse);
    assert_eq!(stmts.len(), 3);
    let damaged: Vec<bool> = stmts.iter().map(|s| s.has_errors()).collect();
    assert_eq!(damaged, vec![false, true, false]);
}

#[test]
fn missing_semicolon_is_synthesized() {
    let src = "class A { void m() { int a = 1 int c = 3; } }";
    let parse = parse_source(src).unwrap();
    assert_eq!(parse.errors.len(), 1);
    assert!(matches!(
        parse.errors[0].kind,
        SyntaxErrorKind::UnexpectedToken { expected: TokenKind::Semi, found: TokenKind::KwInt }
    ));
    let stmts = statements(&parse);
    assert_eq!(stmts.len(), 2);
    assert!(stmts[0].children().iter().any(|c| c.is_missing()));
    assert!(!stmts[1].has_errors());
}

#[test]
fn extra_token_is_skipped() {
    let src = "class A { void m() { foo(a b); } }";
    let parse = parse_source(src).unwrap();
    assert_eq!(parse.errors.len(), 1);
    let args = parse.root.first(NodeKind::Arguments).unwrap();
    let skipped = args.child_of(NodeKind::Error).expect("skipped token");
    assert_eq!(skipped.text(), "b");
}

#[test]
fn bare_names_are_not_statements() {
    let parse = parse_source("class A { void m() { a + b; x; f(); } }").unwrap();
    let kinds: Vec<&SyntaxErrorKind> = parse.errors.iter().map(|e| &e.kind).collect();
    assert_eq!(kinds, vec![&SyntaxErrorKind::NotAStatement, &SyntaxErrorKind::NotAStatement]);
    assert_eq!(parse.root.find_all(NodeKind::ExpressionStatement).count(), 3);
}

#[test]
fn try_needs_catch_or_finally() {
    let parse = parse_source("class A { void m() { try { } } }").unwrap();
    assert_eq!(parse.errors.len(), 1);
    assert_eq!(parse.errors[0].kind, SyntaxErrorKind::MissingCatchOrFinally);
    assert!(parse.root.first(NodeKind::TryStatement).is_some());

    let parse = parse_source("class A { void m() { try (R r = r()) { } } }").unwrap();
    assert!(parse.is_ok(), "{:?}", parse.errors);
}

#[test]
fn garbage_member_does_not_stop_the_class() {
    let src = "class A { ) int x; void m() {} }";
    let parse = parse_source(src).unwrap();
    assert!(!parse.is_ok());
    assert!(parse.root.first(NodeKind::FieldDeclaration).is_some());
    assert!(parse.root.first(NodeKind::MethodDeclaration).is_some());
    assert_eq!(in_tree(&parse.root), lexed(src));
}

#[test]
fn deep_parentheses_hit_the_nesting_limit() {
    let (errors, round_trip) = with_stack(|| {
        let src = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let parse = parse_expression_source(&src).unwrap();
        let round_trip = in_tree(&parse.root) == lexed(&src);
        (parse.errors, round_trip)
    });
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_fatal());
    assert!(matches!(errors[0].kind, SyntaxErrorKind::TooDeeplyNested { limit: 96 }));
    assert!(round_trip);
}

#[test]
fn deep_blocks_keep_earlier_declarations() {
    let (kinds, round_trip) = with_stack(|| {
        let src = format!(
            "class Ok {{}} class Deep {{ void m() {}{} }}",
            "{".repeat(5_000),
            "}".repeat(5_000)
        );
        let parse = parse_source(&src).unwrap();
        let kinds: Vec<NodeKind> = parse.root.child_nodes().map(Node::kind).collect();
        let round_trip = in_tree(&parse.root) == lexed(&src);
        (kinds, round_trip)
    });
    assert_eq!(kinds, vec![NodeKind::NormalClassDeclaration, NodeKind::Error]);
    assert!(round_trip);
}

#[test]
fn relational_chain_outlasts_failed_type_argument_trials() {
    let (errors, kinds, relations) = with_stack(|| {
        let chain = (0..60).map(|i| format!("v{i}")).collect::<Vec<_>>().join(" < ");
        let src = format!("class A {{ boolean f = {chain}; }} class B {{}}");
        let parse = parse_source(&src).unwrap();
        let kinds: Vec<NodeKind> = parse.root.child_nodes().map(Node::kind).collect();
        let relations = parse.root.find_all(NodeKind::RelationalExpression).count();
        (parse.errors, kinds, relations)
    });
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(kinds, vec![NodeKind::NormalClassDeclaration, NodeKind::NormalClassDeclaration]);
    assert_eq!(relations, 59);
}

#[test]
fn long_operator_chain_parses_and_drops() {
    let src = vec!["a"; 100_000].join(" + ");
    let parse = parse_expression_source(&src).unwrap();
    assert!(parse.is_ok());
    let root = parse.root;
    assert_eq!(root.tokens().filter(|t| t.kind == TokenKind::Identifier).count(), 100_000);
    assert_eq!(root.find_all(NodeKind::AdditiveExpression).count(), 99_999);
    drop(root);
}

#[derive(Default)]
struct Recorder {
    depth: usize,
    max_depth: usize,
    entered: usize,
    exited: usize,
    last_offset: Option<usize>,
    in_order: bool,
}

impl<'src> Listener<'src> for Recorder {
    fn enter(&mut self, _node: &Node<'src>) {
        self.depth += 1;
        self.entered += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn exit(&mut self, _node: &Node<'src>) {
        self.depth -= 1;
        self.exited += 1;
    }

    fn token(&mut self, token: &Token<'src>) {
        if self.last_offset.is_some_and(|last| last > token.start()) {
            self.in_order = false;
        }
        self.last_offset = Some(token.start());
    }

    fn missing(&mut self, _expected: TokenKind, _span: Span) {}
}

#[test]
fn listener_events_are_balanced_and_ordered() {
    let src = "class A { int f(int x) { return x * (x + 1); } }";
    let parse = parse_source(src).unwrap();
    let mut recorder = Recorder {
        in_order: true,
        ..Recorder::default()
    };
    walk(&parse.root, &mut recorder);
    assert_eq!(recorder.depth, 0);
    assert_eq!(recorder.entered, recorder.exited);
    assert_eq!(recorder.entered, parse.root.descendants().count());
    assert!(recorder.max_depth > 5);
    assert!(recorder.in_order);
}
