use jcst_parse::{parse_expression_source, parse_source};
use jcst_syntax::{dump, Element, Node, NodeKind, TokenKind};

fn expr(src: &str) -> String {
    let parse = parse_expression_source(src).expect("source should lex");
    assert!(parse.is_ok(), "{src}: {:?}", parse.errors);
    let root = parse.root;
    let inner = root.child(0).and_then(Element::as_node).expect("expression node");
    dump(inner)
}

fn unit(src: &str) -> Node<'_> {
    let parse = parse_source(src).expect("source should lex");
    assert!(parse.is_ok(), "{src}: {:?}", parse.errors);
    parse.root
}

fn in_method(body: &str) -> String {
    format!("class A {{ void m() {{ {body} }} }}")
}

#[test]
fn ternary_nests_in_else_branch() {
    assert_eq!(
        expr("a ? b : c ? d : e"),
        "(ConditionalExpression (ExpressionName a) ? (ExpressionName b) : \
         (ConditionalExpression (ExpressionName c) ? (ExpressionName d) : (ExpressionName e)))"
    );
}

#[test]
fn logical_and_binds_tighter_than_or() {
    assert_eq!(
        expr("a || b && c"),
        "(ConditionalOrExpression (ExpressionName a) || \
         (ConditionalAndExpression (ExpressionName b) && (ExpressionName c)))"
    );
}

#[test]
fn additive_binds_tighter_than_shift() {
    assert_eq!(
        expr("a + b << c"),
        "(ShiftExpression (AdditiveExpression (ExpressionName a) + (ExpressionName b)) < < (ExpressionName c))"
    );
}

#[test]
fn instanceof_sits_at_relational_level() {
    assert_eq!(
        expr("x instanceof T && y"),
        "(ConditionalAndExpression (InstanceofExpression (ExpressionName x) instanceof \
         (ClassType (ClassTypeSegment T))) && (ExpressionName y))"
    );
}

#[test]
fn parenthesized_type_before_name_is_cast() {
    assert_eq!(
        expr("(Foo) bar"),
        "(CastExpression ( (ClassType (ClassTypeSegment Foo)) ) (ExpressionName bar))"
    );
}

#[test]
fn parenthesized_name_before_parens_is_call() {
    assert_eq!(
        expr("(foo)(bar)"),
        "(Primary (MethodInvocation (ParenthesizedExpression ( (ExpressionName foo) )) \
         (Arguments ( (ArgumentList (ExpressionName bar)) ))))"
    );
}

#[test]
fn parenthesized_list_before_arrow_is_lambda() {
    assert_eq!(
        expr("(x, y) -> x + y"),
        "(LambdaExpression (LambdaParameters ( (InferredFormalParameterList x , y) )) -> \
         (AdditiveExpression (ExpressionName x) + (ExpressionName y)))"
    );
}

#[test]
fn lone_parenthesized_name_is_expression() {
    assert_eq!(expr("(x)"), "(ParenthesizedExpression ( (ExpressionName x) ))");
}

#[test]
fn primitive_cast_takes_signed_operand() {
    assert_eq!(
        expr("(int) -x"),
        "(CastExpression ( (PrimitiveType int) ) (UnaryExpression - (ExpressionName x)))"
    );
}

#[test]
fn parenthesized_name_before_minus_is_subtraction() {
    assert_eq!(
        expr("(a) - b"),
        "(AdditiveExpression (ParenthesizedExpression ( (ExpressionName a) )) - (ExpressionName b))"
    );
}

#[test]
fn cast_applies_to_lambda() {
    assert_eq!(
        expr("(Runnable) () -> {}"),
        "(CastExpression ( (ClassType (ClassTypeSegment Runnable)) ) \
         (LambdaExpression (LambdaParameters ( )) -> (Block { })))"
    );
}

#[test]
fn less_than_between_names_is_relational() {
    assert_eq!(
        expr("a < b"),
        "(RelationalExpression (ExpressionName a) < (ExpressionName b))"
    );
}

#[test]
fn adjacent_angles_form_a_shift() {
    assert_eq!(
        expr("a >> b"),
        "(ShiftExpression (ExpressionName a) > > (ExpressionName b))"
    );
    assert_eq!(
        expr("a >>> b"),
        "(ShiftExpression (ExpressionName a) > > > (ExpressionName b))"
    );
}

#[test]
fn separated_angles_are_not_a_shift() {
    let parse = parse_expression_source("a > > b").unwrap();
    assert!(!parse.is_ok());
}

#[test]
fn generic_method_reference() {
    assert_eq!(
        expr("List<String>::new"),
        "(Primary (MethodReference (ExpressionName List) \
         (TypeArguments < (ClassType (ClassTypeSegment String)) >) :: new))"
    );
}

#[test]
fn suffix_chain_is_one_primary() {
    assert_eq!(
        expr("a.b[0].c()"),
        "(Primary (MethodInvocation (ArrayAccess (FieldAccess (ExpressionName a) . b) [ (Literal 0) ]) \
         . c (Arguments ( ))))"
    );
}

#[test]
fn class_literals_and_qualified_this() {
    assert_eq!(
        expr("int[].class"),
        "(ClassLiteral (PrimitiveType int) (Dims (Dim [ ])) . class)"
    );
    assert_eq!(
        expr("Outer.this"),
        "(Primary (QualifiedThis (ExpressionName Outer) . this))"
    );
}

#[test]
fn array_creation_with_sizes_and_initializer() {
    assert_eq!(
        expr("new int[3][]"),
        "(ArrayCreationExpression new (PrimitiveType int) (DimExprs (DimExpr [ (Literal 3) ])) (Dims (Dim [ ])))"
    );
    assert_eq!(
        expr("new String[] {a}"),
        "(ArrayCreationExpression new (ClassType (ClassTypeSegment String)) (Dims (Dim [ ])) \
         (ArrayInitializer { (ExpressionName a) }))"
    );
}

#[test]
fn instance_creation_with_diamond_and_body() {
    assert_eq!(
        expr("new ArrayList<>()"),
        "(ClassInstanceCreationExpression new \
         (ClassType (ClassTypeSegment ArrayList (TypeArguments < >))) (Arguments ( )))"
    );
    let root = unit("class A { Object o = new Object() { int x; }; }");
    let creation = root.first(NodeKind::ClassInstanceCreationExpression).unwrap();
    assert!(creation.child_of(NodeKind::ClassBody).is_some());
}

#[test]
fn generic_local_variable_declares() {
    let src = in_method("List<String> l;");
    let root = unit(&src);
    assert!(root.first(NodeKind::LocalVariableDeclarationStatement).is_some());
    assert!(root.first(NodeKind::ExpressionStatement).is_none());
}

#[test]
fn nested_generics_close_with_two_angles() {
    let src = in_method("List<List<String>> x; y = a >> b;");
    let root = unit(&src);
    let declaration = root.first(NodeKind::LocalVariableDeclaration).unwrap();
    let closing = declaration.tokens().filter(|t| t.kind == TokenKind::Gt).count();
    assert_eq!(closing, 2);
    assert_eq!(declaration.find_all(NodeKind::TypeArguments).count(), 2);
    assert!(root.first(NodeKind::ShiftExpression).is_some());
}

#[test]
fn method_with_and_without_throws_differ_in_one_slot() {
    let with = unit("class A { void m() throws E {} }");
    let without = unit("class A { void m() {} }");
    let with = with.first(NodeKind::MethodHeader).unwrap();
    let without = without.first(NodeKind::MethodHeader).unwrap();
    assert_eq!(with.children().len(), without.children().len());

    let differing: Vec<usize> = (0..with.children().len())
        .filter(|&i| {
            let (a, b) = (&with.children()[i], &without.children()[i]);
            a.node_kind() != b.node_kind() || a.token_kind() != b.token_kind() || a.is_absent() != b.is_absent()
        })
        .collect();
    assert_eq!(differing, vec![3]);
    assert_eq!(with.children()[3].node_kind(), Some(NodeKind::Throws));
    assert!(without.children()[3].is_absent());
}

#[test]
fn compilation_unit_covers_declarations() {
    let src = r#"
package com.example;

import java.util.*;
import static java.lang.Math.max;

@SuppressWarnings("unchecked")
public final class Box<T extends Comparable<T> & Cloneable> extends Base implements Iterable<T> {
    private static final int[] SIZES = {1, 2, 3,};
    static { init(); }

    public <R> Box(T value) throws Exception {
        this(value, 0);
    }

    @Override
    public Iterator<T> iterator() { return null; }

    abstract void visit(String... names);
}

enum Color { RED, GREEN(1) { }, BLUE; int code; }

interface Shape { double area(); default int sides() { return 0; } }

@interface Marker { String value() default "x"; int[] ids() default {1}; }
"#;
    let root = unit(src);
    assert!(root.first(NodeKind::PackageDeclaration).is_some());
    assert!(root.first(NodeKind::TypeImportOnDemandDeclaration).is_some());
    assert!(root.first(NodeKind::SingleStaticImportDeclaration).is_some());
    assert!(root.first(NodeKind::SingleElementAnnotation).is_some());
    assert!(root.first(NodeKind::TypeBound).is_some());
    assert!(root.first(NodeKind::AdditionalBound).is_some());
    assert!(root.first(NodeKind::StaticInitializer).is_some());
    assert!(root.first(NodeKind::ConstructorDeclaration).is_some());
    assert!(root.first(NodeKind::ExplicitConstructorInvocation).is_some());
    assert!(root.first(NodeKind::LastFormalParameter).is_some());
    assert_eq!(root.find_all(NodeKind::EnumConstant).count(), 3);
    assert!(root.first(NodeKind::EnumBodyDeclarations).is_some());
    assert_eq!(root.find_all(NodeKind::InterfaceMethodDeclaration).count(), 2);
    assert_eq!(root.find_all(NodeKind::AnnotationTypeElementDeclaration).count(), 2);
    assert_eq!(root.find_all(NodeKind::DefaultValue).count(), 2);
}

#[test]
fn statements_cover_control_flow() {
    let body = r#"
outer:
for (int i = 0, j = 1; i < n; i++, j--) {
    if (a) continue outer; else if (b) break; else { return; }
}
for (final String s : items) { use(s); }
while (x) x--;
do { y++; } while (y < 10);
switch (k) { case 1: case 2: f(); break; default: }
try (Reader r = open(); Writer w = make()) { run(); } catch (IOException | RuntimeException e) { } finally { done(); }
synchronized (lock) { count += 1; }
assert ok : "message";
throw new IllegalStateException();
"#;
    let src = in_method(body);
    let root = unit(&src);
    assert!(root.first(NodeKind::LabeledStatement).is_some());
    assert!(root.first(NodeKind::BasicForStatement).is_some());
    assert!(root.first(NodeKind::ForUpdate).is_some());
    assert!(root.first(NodeKind::EnhancedForStatement).is_some());
    assert_eq!(root.find_all(NodeKind::IfStatement).count(), 2);
    assert!(root.first(NodeKind::DoStatement).is_some());
    assert_eq!(root.find_all(NodeKind::SwitchLabel).count(), 3);
    assert!(root.first(NodeKind::TryWithResourcesStatement).is_some());
    assert_eq!(root.find_all(NodeKind::Resource).count(), 2);
    assert!(root.first(NodeKind::CatchType).is_some());
    assert!(root.first(NodeKind::SynchronizedStatement).is_some());
    assert!(root.first(NodeKind::AssertStatement).is_some());
    assert!(root.first(NodeKind::ThrowStatement).is_some());
}

#[test]
fn else_if_chain_nests_in_else_slot() {
    let src = in_method("if (a) x(); else if (b) y(); else z();");
    let root = unit(&src);
    let outer = root.first(NodeKind::IfStatement).unwrap();
    assert_eq!(outer.children().len(), 7);
    assert_eq!(outer.children()[6].node_kind(), Some(NodeKind::IfStatement));
}

#[test]
fn lambdas_and_method_references_as_arguments() {
    let src = in_method(
        "list.stream().map(String::valueOf).filter(s -> !s.isEmpty()).forEach(System.out::println);",
    );
    let root = unit(&src);
    assert_eq!(root.find_all(NodeKind::MethodReference).count(), 2);
    assert_eq!(root.find_all(NodeKind::LambdaExpression).count(), 1);
}

#[test]
fn generic_calls_and_intersection_casts() {
    let src = in_method(
        "Collections.<String>emptyList(); Object r = (Runnable & Serializable) () -> {};",
    );
    let root = unit(&src);
    let call = root.first(NodeKind::MethodInvocation).unwrap();
    assert_eq!(call.children()[2].node_kind(), Some(NodeKind::TypeArguments));
    let cast = root.first(NodeKind::CastExpression).unwrap();
    assert!(cast.child_of(NodeKind::AdditionalBound).is_some());
    assert!(cast.child_of(NodeKind::LambdaExpression).is_some());
}

#[test]
fn qualified_and_plain_creation_share_slots() {
    let plain = unit("class A { Object o = new Inner(); }");
    let qualified = unit("class A { Object o = outer.new Inner(); }");
    let plain = plain.first(NodeKind::ClassInstanceCreationExpression).unwrap();
    let qualified = qualified.first(NodeKind::ClassInstanceCreationExpression).unwrap();
    assert_eq!(plain.children().len(), 7);
    assert_eq!(qualified.children().len(), 7);
    assert!(plain.children()[0].is_absent());
    assert!(plain.children()[1].is_absent());
    assert_eq!(qualified.children()[0].node_kind(), Some(NodeKind::ExpressionName));
    assert_eq!(qualified.children()[1].token_kind(), Some(TokenKind::Dot));
}
