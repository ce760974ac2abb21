//! SyntaxKind enum for the Lua CST.
//!
//! Token kinds (leaves) come first, composite node kinds after them. Only
//! the subset of Lua that expression inference looks at is modelled.

/// Every kind of syntax element in the Lua CST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // ── Sentinels ──────────────────────────────────────────────────────
    TOMBSTONE = 0,
    ERROR_NODE = 1,

    // ── Trivia ─────────────────────────────────────────────────────────
    WHITESPACE,
    COMMENT,

    // ── Keywords ───────────────────────────────────────────────────────
    AND_KW,
    END_KW,
    FALSE_KW,
    FUNCTION_KW,
    LOCAL_KW,
    NIL_KW,
    NOT_KW,
    OR_KW,
    RETURN_KW,
    TRUE_KW,

    // ── Arithmetic operators ───────────────────────────────────────────
    PLUS,
    MINUS,
    STAR,
    SLASH,
    /// `//` floor division
    DOUBLE_SLASH,
    PERCENT,
    /// `^` exponent
    CARET,

    // ── Bitwise operators ──────────────────────────────────────────────
    AMP,
    PIPE,
    /// `~`, binary xor or unary bitwise not
    TILDE,
    SHL,
    SHR,

    // ── Other operators ────────────────────────────────────────────────
    /// `..` concatenation
    CONCAT,
    /// `#` length-of
    HASH,
    EQ_EQ,
    /// `~=`
    NOT_EQ,
    LT,
    LT_EQ,
    GT,
    GT_EQ,
    EQ,

    // ── Delimiters and punctuation ─────────────────────────────────────
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    L_BRACE,
    R_BRACE,
    DOT,
    COLON,
    COMMA,
    SEMICOLON,
    ELLIPSIS,

    // ── Literals and identifiers ───────────────────────────────────────
    NUMBER,
    STRING,
    IDENT,

    // ── Composite node kinds ───────────────────────────────────────────
    /// Root node of a Lua file.
    SOURCE_FILE,
    /// Statement sequence.
    BLOCK,
    /// `local a, b = x, y`
    LOCAL_STMT,
    /// `local function f() ... end`
    LOCAL_FUNC_STMT,
    /// `function a.b:c() ... end`
    FUNC_STMT,
    /// `return x, y`
    RETURN_STMT,
    /// A call used as a statement.
    CALL_STMT,
    /// Name in a declaration position.
    NAME,
    NAME_LIST,
    EXPR_LIST,
    PARAM_LIST,
    /// Parameter list plus block plus `end`.
    FUNC_BODY,
    ARG_LIST,
    /// `nil`, `true`, `false`, numbers and strings.
    LITERAL,
    /// Identifier used as an expression.
    NAME_EXPR,
    /// `(expr)`
    PAREN_EXPR,
    UNARY_EXPR,
    BINARY_EXPR,
    /// `f(args)`, `f "str"`, `obj:m(args)`
    CALL_EXPR,
    /// `a.b`, `a:b`, `a[k]`
    INDEX_EXPR,
    /// `function(params) ... end`
    CLOSURE_EXPR,
    /// `{ ... }`
    TABLE_EXPR,
}

impl SyntaxKind {
    /// Whether this kind is trivia (whitespace or comment).
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::WHITESPACE | SyntaxKind::COMMENT)
    }

    /// The fixed source text of a keyword, operator or punctuation kind.
    ///
    /// Returns `None` for kinds whose text varies (identifiers, literals,
    /// trivia) and for composite nodes.
    pub fn fixed_text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        let text = match self {
            AND_KW => "and",
            END_KW => "end",
            FALSE_KW => "false",
            FUNCTION_KW => "function",
            LOCAL_KW => "local",
            NIL_KW => "nil",
            NOT_KW => "not",
            OR_KW => "or",
            RETURN_KW => "return",
            TRUE_KW => "true",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            DOUBLE_SLASH => "//",
            PERCENT => "%",
            CARET => "^",
            AMP => "&",
            PIPE => "|",
            TILDE => "~",
            SHL => "<<",
            SHR => ">>",
            CONCAT => "..",
            HASH => "#",
            EQ_EQ => "==",
            NOT_EQ => "~=",
            LT => "<",
            LT_EQ => "<=",
            GT => ">",
            GT_EQ => ">=",
            EQ => "=",
            L_PAREN => "(",
            R_PAREN => ")",
            L_BRACKET => "[",
            R_BRACKET => "]",
            L_BRACE => "{",
            R_BRACE => "}",
            DOT => ".",
            COLON => ":",
            COMMA => ",",
            SEMICOLON => ";",
            ELLIPSIS => "...",
            _ => return None,
        };
        Some(text)
    }

    /// Whether this token kind can appear as the operator of a binary expression.
    pub fn is_binary_op(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            PLUS | MINUS
                | STAR
                | SLASH
                | DOUBLE_SLASH
                | PERCENT
                | CARET
                | AMP
                | PIPE
                | TILDE
                | SHL
                | SHR
                | CONCAT
                | EQ_EQ
                | NOT_EQ
                | LT
                | LT_EQ
                | GT
                | GT_EQ
                | AND_KW
                | OR_KW
        )
    }

    /// Whether this token kind can appear as the operator of a unary expression.
    pub fn is_unary_op(self) -> bool {
        matches!(
            self,
            SyntaxKind::MINUS | SyntaxKind::NOT_KW | SyntaxKind::HASH | SyntaxKind::TILDE
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}
