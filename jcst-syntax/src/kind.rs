#![forbid(unsafe_code)]

use std::fmt;

/// Coarse grouping of node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Name,
    Type,
    Declaration,
    Modifier,
    Statement,
    Expression,
    Literal,
    Error,
}

macro_rules! node_kinds {
    ($($category:ident { $($kind:ident),* $(,)? })*) => {
        /// Every rule kind the parser can build.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($($kind,)*)*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[$($(NodeKind::$kind,)*)*];

            pub fn category(self) -> NodeCategory {
                match self {
                    $($(NodeKind::$kind => NodeCategory::$category,)*)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($(NodeKind::$kind => stringify!($kind),)*)*
                }
            }
        }
    };
}

node_kinds! {
    Name {
        QualifiedName,
        ExpressionName,
    }
    Type {
        PrimitiveType,
        ClassType,
        ClassTypeSegment,
        ArrayType,
        Dims,
        Dim,
        TypeArguments,
        Wildcard,
        WildcardBounds,
        TypeParameters,
        TypeParameter,
        TypeBound,
        AdditionalBound,
    }
    Modifier {
        Modifiers,
        Annotations,
        NormalAnnotation,
        MarkerAnnotation,
        SingleElementAnnotation,
        ElementValuePair,
        ElementValueArrayInitializer,
    }
    Declaration {
        CompilationUnit,
        PackageDeclaration,
        SingleTypeImportDeclaration,
        TypeImportOnDemandDeclaration,
        SingleStaticImportDeclaration,
        StaticImportOnDemandDeclaration,
        EmptyDeclaration,
        NormalClassDeclaration,
        EnumDeclaration,
        NormalInterfaceDeclaration,
        AnnotationTypeDeclaration,
        Superclass,
        Superinterfaces,
        ExtendsInterfaces,
        InterfaceTypeList,
        ClassBody,
        InterfaceBody,
        AnnotationTypeBody,
        EnumBody,
        EnumConstant,
        EnumBodyDeclarations,
        FieldDeclaration,
        ConstantDeclaration,
        VariableDeclaratorList,
        VariableDeclarator,
        VariableDeclaratorId,
        ArrayInitializer,
        MethodDeclaration,
        InterfaceMethodDeclaration,
        MethodHeader,
        MethodDeclarator,
        FormalParameterList,
        FormalParameter,
        LastFormalParameter,
        ReceiverParameter,
        Throws,
        ExceptionTypeList,
        MethodBody,
        InstanceInitializer,
        StaticInitializer,
        ConstructorDeclaration,
        ConstructorDeclarator,
        ConstructorBody,
        ExplicitConstructorInvocation,
        AnnotationTypeElementDeclaration,
        DefaultValue,
        LocalVariableDeclaration,
    }
    Statement {
        Block,
        LocalVariableDeclarationStatement,
        EmptyStatement,
        LabeledStatement,
        ExpressionStatement,
        IfStatement,
        AssertStatement,
        SwitchStatement,
        SwitchBlock,
        SwitchBlockStatementGroup,
        SwitchLabel,
        WhileStatement,
        DoStatement,
        BasicForStatement,
        ForInit,
        ForUpdate,
        StatementExpressionList,
        EnhancedForStatement,
        BreakStatement,
        ContinueStatement,
        ReturnStatement,
        ThrowStatement,
        SynchronizedStatement,
        TryStatement,
        TryWithResourcesStatement,
        Catches,
        CatchClause,
        CatchFormalParameter,
        CatchType,
        Finally,
        ResourceSpecification,
        Resource,
    }
    Expression {
        ExpressionRoot,
        LambdaExpression,
        LambdaParameters,
        InferredFormalParameterList,
        Assignment,
        ConditionalExpression,
        ConditionalOrExpression,
        ConditionalAndExpression,
        InclusiveOrExpression,
        ExclusiveOrExpression,
        AndExpression,
        EqualityExpression,
        RelationalExpression,
        InstanceofExpression,
        ShiftExpression,
        AdditiveExpression,
        MultiplicativeExpression,
        PreIncrementExpression,
        PreDecrementExpression,
        UnaryExpression,
        CastExpression,
        PostIncrementExpression,
        PostDecrementExpression,
        Primary,
        ParenthesizedExpression,
        ThisExpression,
        QualifiedThis,
        ClassLiteral,
        FieldAccess,
        ArrayAccess,
        MethodInvocation,
        Arguments,
        ArgumentList,
        MethodReference,
        ClassInstanceCreationExpression,
        ArrayCreationExpression,
        DimExprs,
        DimExpr,
    }
    Literal {
        Literal,
    }
    Error {
        Error,
    }
}

impl NodeKind {
    pub fn is_statement(self) -> bool {
        self.category() == NodeCategory::Statement
    }

    pub fn is_expression(self) -> bool {
        self.category() == NodeCategory::Expression
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
