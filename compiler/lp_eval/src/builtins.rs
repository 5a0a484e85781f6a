//! The closed set of builtin handlers.
//!
//! Builtins are ordinary environment bindings, so dispatch is a name
//! lookup followed by a `match` on [`Builtin`]; a program may shadow one
//! by rebinding its name.

/// A builtin handler. Each one is a prefix operator that decides how much
/// of the token stream it consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `define name <raw span>`: macro definition.
    Define,
    /// `def name(params){body}`: function definition.
    Def,
    /// `call name args...`: function invocation.
    Call,
    /// `print value`: emit a value.
    Print,
    /// `name = value`: assignment (pops the target off the operand stack).
    Assign,
    /// `left + right`: addition/concatenation.
    Plus,
    /// `if (cond){body} [elif (cond){body}]* [else {body}]`
    If,
    /// Only valid inside an `if` chain.
    Elif,
    /// Only valid inside an `if` chain.
    Else,
    /// `for name[, name...] in <iterable>{body}`
    For,
    /// `foreign <language> <source>`: delegate to a foreign executor.
    Foreign,
    /// `;`: statement separator, does nothing.
    Separator,
}

impl Builtin {
    /// Every builtin, in binding order.
    pub const ALL: [Builtin; 12] = [
        Builtin::Define,
        Builtin::Def,
        Builtin::Call,
        Builtin::Print,
        Builtin::Assign,
        Builtin::Plus,
        Builtin::If,
        Builtin::Elif,
        Builtin::Else,
        Builtin::For,
        Builtin::Foreign,
        Builtin::Separator,
    ];

    /// The name the builtin is bound under.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Define => "define",
            Builtin::Def => "def",
            Builtin::Call => "call",
            Builtin::Print => "print",
            Builtin::Assign => "=",
            Builtin::Plus => "+",
            Builtin::If => "if",
            Builtin::Elif => "elif",
            Builtin::Else => "else",
            Builtin::For => "for",
            Builtin::Foreign => "foreign",
            Builtin::Separator => ";",
        }
    }
}
