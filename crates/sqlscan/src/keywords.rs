//! SQL keyword resolution.
//!
//! Length-bucketed lookup, mirroring the reserved-keyword table structure
//! used for the host language's own keyword set: reject on length and
//! first-byte class before ever comparing full text, then match against
//! the keywords of that exact length. Real SQL dialects carry several
//! hundred keywords; the table below covers the core SQL-92/SQL:2016
//! keyword set plus the handful this crate's own test scenarios exercise.
//! Extending it is purely additive: add the word to its length bucket and
//! a variant to [`KeywordKind`].
//!
//! Keywords are matched case-insensitively by the caller: [`lookup`]
//! expects its input already folded to lowercase ASCII (the scanner does
//! this once, during identifier accumulation, rather than having every
//! comparison here re-fold per byte).

/// A single resolved SQL keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeywordKind {
    /// Synthesized directly by the scanner's national-character-opener rule
    /// (`[nN]'`), never reached through [`lookup`].
    Nchar,
    As,
    By,
    Do,
    If,
    In,
    Is,
    Of,
    On,
    Or,
    To,
    Add,
    All,
    And,
    Any,
    Asc,
    Day,
    End,
    For,
    Key,
    Not,
    Old,
    Out,
    Set,
    Both,
    Call,
    Case,
    Cast,
    Char,
    Data,
    Desc,
    Drop,
    Each,
    Else,
    From,
    Full,
    Hour,
    Into,
    Join,
    Left,
    Like,
    Null,
    Only,
    Over,
    Rows,
    Some,
    Text,
    Then,
    True,
    User,
    View,
    When,
    With,
    Year,
    Zone,
    Alter,
    Array,
    Begin,
    Check,
    Class,
    Count,
    Cross,
    False,
    Fetch,
    First,
    Force,
    Grant,
    Group,
    Index,
    Inner,
    Large,
    Level,
    Limit,
    Local,
    Merge,
    Month,
    Names,
    Order,
    Outer,
    Owner,
    Range,
    Right,
    Start,
    Table,
    Union,
    Until,
    Usage,
    Using,
    Value,
    Where,
    While,
    Write,
    Access,
    Action,
    Always,
    Column,
    Commit,
    Create,
    Cursor,
    Delete,
    Domain,
    Double,
    Escape,
    Except,
    Exists,
    Export,
    Global,
    Having,
    Ignore,
    Import,
    Insert,
    Invoke,
    Method,
    Module,
    Object,
    Offset,
    Option,
    Origin,
    Output,
    Public,
    Reduce,
    Rename,
    Repeat,
    Return,
    Scroll,
    Second,
    Select,
    Server,
    Signal,
    Simple,
    Source,
    Static,
    Strict,
    String,
    Symbol,
    System,
    Target,
    Unique,
    Update,
    Values,
    Window,
    Between,
    Cascade,
    Comment,
    Current,
    Default,
    Inherit,
    Integer,
    Natural,
    Partial,
    Primary,
    Replace,
    Restart,
    Session,
    Storage,
    Varchar,
    Version,
    Without,
    Absolute,
    Cascaded,
    Continue,
    Database,
    Deferred,
    Distinct,
    Function,
    Language,
    Operator,
    Overlaps,
    Relative,
    Sequence,
    Template,
    Truncate,
    Variable,
    Character,
    Immediate,
    Precision,
    Procedure,
    Recursive,
    Savepoint,
    Statement,
    Temporary,
    Transform,
    Constraint,
    Deallocate,
    Deferrable,
    References,
}

/// Look up a keyword by its lowercase-folded text.
///
/// Returns `(kind, canonical lowercase spelling)` on a match. Guards on
/// length (2..=10, the span of the table above) and on the first byte
/// being an ASCII letter before ever touching the match arms, so the
/// overwhelming majority of identifiers (too short, too long, or
/// underscore/high-bit-led) are rejected in two comparisons.
#[inline]
#[must_use]
pub fn lookup(text: &[u8]) -> Option<(KeywordKind, &'static str)> {
    let len = text.len();
    if !(2..=10).contains(&len) {
        return None;
    }
    if !text[0].is_ascii_alphabetic() {
        return None;
    }

    match len {
        2 => match text {
            b"as" => Some((KeywordKind::As, "as")),
            b"by" => Some((KeywordKind::By, "by")),
            b"do" => Some((KeywordKind::Do, "do")),
            b"if" => Some((KeywordKind::If, "if")),
            b"in" => Some((KeywordKind::In, "in")),
            b"is" => Some((KeywordKind::Is, "is")),
            b"of" => Some((KeywordKind::Of, "of")),
            b"on" => Some((KeywordKind::On, "on")),
            b"or" => Some((KeywordKind::Or, "or")),
            b"to" => Some((KeywordKind::To, "to")),
            _ => None,
        },
        3 => match text {
            b"add" => Some((KeywordKind::Add, "add")),
            b"all" => Some((KeywordKind::All, "all")),
            b"and" => Some((KeywordKind::And, "and")),
            b"any" => Some((KeywordKind::Any, "any")),
            b"asc" => Some((KeywordKind::Asc, "asc")),
            b"day" => Some((KeywordKind::Day, "day")),
            b"end" => Some((KeywordKind::End, "end")),
            b"for" => Some((KeywordKind::For, "for")),
            b"key" => Some((KeywordKind::Key, "key")),
            b"not" => Some((KeywordKind::Not, "not")),
            b"old" => Some((KeywordKind::Old, "old")),
            b"out" => Some((KeywordKind::Out, "out")),
            b"set" => Some((KeywordKind::Set, "set")),
            _ => None,
        },
        4 => match text {
            b"both" => Some((KeywordKind::Both, "both")),
            b"call" => Some((KeywordKind::Call, "call")),
            b"case" => Some((KeywordKind::Case, "case")),
            b"cast" => Some((KeywordKind::Cast, "cast")),
            b"char" => Some((KeywordKind::Char, "char")),
            b"data" => Some((KeywordKind::Data, "data")),
            b"desc" => Some((KeywordKind::Desc, "desc")),
            b"drop" => Some((KeywordKind::Drop, "drop")),
            b"each" => Some((KeywordKind::Each, "each")),
            b"else" => Some((KeywordKind::Else, "else")),
            b"from" => Some((KeywordKind::From, "from")),
            b"full" => Some((KeywordKind::Full, "full")),
            b"hour" => Some((KeywordKind::Hour, "hour")),
            b"into" => Some((KeywordKind::Into, "into")),
            b"join" => Some((KeywordKind::Join, "join")),
            b"left" => Some((KeywordKind::Left, "left")),
            b"like" => Some((KeywordKind::Like, "like")),
            b"null" => Some((KeywordKind::Null, "null")),
            b"only" => Some((KeywordKind::Only, "only")),
            b"over" => Some((KeywordKind::Over, "over")),
            b"rows" => Some((KeywordKind::Rows, "rows")),
            b"some" => Some((KeywordKind::Some, "some")),
            b"text" => Some((KeywordKind::Text, "text")),
            b"then" => Some((KeywordKind::Then, "then")),
            b"true" => Some((KeywordKind::True, "true")),
            b"user" => Some((KeywordKind::User, "user")),
            b"view" => Some((KeywordKind::View, "view")),
            b"when" => Some((KeywordKind::When, "when")),
            b"with" => Some((KeywordKind::With, "with")),
            b"year" => Some((KeywordKind::Year, "year")),
            b"zone" => Some((KeywordKind::Zone, "zone")),
            _ => None,
        },
        5 => match text {
            b"alter" => Some((KeywordKind::Alter, "alter")),
            b"array" => Some((KeywordKind::Array, "array")),
            b"begin" => Some((KeywordKind::Begin, "begin")),
            b"check" => Some((KeywordKind::Check, "check")),
            b"class" => Some((KeywordKind::Class, "class")),
            b"count" => Some((KeywordKind::Count, "count")),
            b"cross" => Some((KeywordKind::Cross, "cross")),
            b"false" => Some((KeywordKind::False, "false")),
            b"fetch" => Some((KeywordKind::Fetch, "fetch")),
            b"first" => Some((KeywordKind::First, "first")),
            b"force" => Some((KeywordKind::Force, "force")),
            b"grant" => Some((KeywordKind::Grant, "grant")),
            b"group" => Some((KeywordKind::Group, "group")),
            b"index" => Some((KeywordKind::Index, "index")),
            b"inner" => Some((KeywordKind::Inner, "inner")),
            b"large" => Some((KeywordKind::Large, "large")),
            b"level" => Some((KeywordKind::Level, "level")),
            b"limit" => Some((KeywordKind::Limit, "limit")),
            b"local" => Some((KeywordKind::Local, "local")),
            b"merge" => Some((KeywordKind::Merge, "merge")),
            b"month" => Some((KeywordKind::Month, "month")),
            b"names" => Some((KeywordKind::Names, "names")),
            b"order" => Some((KeywordKind::Order, "order")),
            b"outer" => Some((KeywordKind::Outer, "outer")),
            b"owner" => Some((KeywordKind::Owner, "owner")),
            b"range" => Some((KeywordKind::Range, "range")),
            b"right" => Some((KeywordKind::Right, "right")),
            b"start" => Some((KeywordKind::Start, "start")),
            b"table" => Some((KeywordKind::Table, "table")),
            b"union" => Some((KeywordKind::Union, "union")),
            b"until" => Some((KeywordKind::Until, "until")),
            b"usage" => Some((KeywordKind::Usage, "usage")),
            b"using" => Some((KeywordKind::Using, "using")),
            b"value" => Some((KeywordKind::Value, "value")),
            b"where" => Some((KeywordKind::Where, "where")),
            b"while" => Some((KeywordKind::While, "while")),
            b"write" => Some((KeywordKind::Write, "write")),
            _ => None,
        },
        6 => match text {
            b"access" => Some((KeywordKind::Access, "access")),
            b"action" => Some((KeywordKind::Action, "action")),
            b"always" => Some((KeywordKind::Always, "always")),
            b"column" => Some((KeywordKind::Column, "column")),
            b"commit" => Some((KeywordKind::Commit, "commit")),
            b"create" => Some((KeywordKind::Create, "create")),
            b"cursor" => Some((KeywordKind::Cursor, "cursor")),
            b"delete" => Some((KeywordKind::Delete, "delete")),
            b"domain" => Some((KeywordKind::Domain, "domain")),
            b"double" => Some((KeywordKind::Double, "double")),
            b"escape" => Some((KeywordKind::Escape, "escape")),
            b"except" => Some((KeywordKind::Except, "except")),
            b"exists" => Some((KeywordKind::Exists, "exists")),
            b"export" => Some((KeywordKind::Export, "export")),
            b"global" => Some((KeywordKind::Global, "global")),
            b"having" => Some((KeywordKind::Having, "having")),
            b"ignore" => Some((KeywordKind::Ignore, "ignore")),
            b"import" => Some((KeywordKind::Import, "import")),
            b"insert" => Some((KeywordKind::Insert, "insert")),
            b"invoke" => Some((KeywordKind::Invoke, "invoke")),
            b"method" => Some((KeywordKind::Method, "method")),
            b"module" => Some((KeywordKind::Module, "module")),
            b"object" => Some((KeywordKind::Object, "object")),
            b"offset" => Some((KeywordKind::Offset, "offset")),
            b"option" => Some((KeywordKind::Option, "option")),
            b"origin" => Some((KeywordKind::Origin, "origin")),
            b"output" => Some((KeywordKind::Output, "output")),
            b"public" => Some((KeywordKind::Public, "public")),
            b"reduce" => Some((KeywordKind::Reduce, "reduce")),
            b"rename" => Some((KeywordKind::Rename, "rename")),
            b"repeat" => Some((KeywordKind::Repeat, "repeat")),
            b"return" => Some((KeywordKind::Return, "return")),
            b"scroll" => Some((KeywordKind::Scroll, "scroll")),
            b"second" => Some((KeywordKind::Second, "second")),
            b"select" => Some((KeywordKind::Select, "select")),
            b"server" => Some((KeywordKind::Server, "server")),
            b"signal" => Some((KeywordKind::Signal, "signal")),
            b"simple" => Some((KeywordKind::Simple, "simple")),
            b"source" => Some((KeywordKind::Source, "source")),
            b"static" => Some((KeywordKind::Static, "static")),
            b"strict" => Some((KeywordKind::Strict, "strict")),
            b"string" => Some((KeywordKind::String, "string")),
            b"symbol" => Some((KeywordKind::Symbol, "symbol")),
            b"system" => Some((KeywordKind::System, "system")),
            b"target" => Some((KeywordKind::Target, "target")),
            b"unique" => Some((KeywordKind::Unique, "unique")),
            b"update" => Some((KeywordKind::Update, "update")),
            b"values" => Some((KeywordKind::Values, "values")),
            b"window" => Some((KeywordKind::Window, "window")),
            _ => None,
        },
        7 => match text {
            b"between" => Some((KeywordKind::Between, "between")),
            b"cascade" => Some((KeywordKind::Cascade, "cascade")),
            b"comment" => Some((KeywordKind::Comment, "comment")),
            b"current" => Some((KeywordKind::Current, "current")),
            b"default" => Some((KeywordKind::Default, "default")),
            b"inherit" => Some((KeywordKind::Inherit, "inherit")),
            b"integer" => Some((KeywordKind::Integer, "integer")),
            b"natural" => Some((KeywordKind::Natural, "natural")),
            b"partial" => Some((KeywordKind::Partial, "partial")),
            b"primary" => Some((KeywordKind::Primary, "primary")),
            b"replace" => Some((KeywordKind::Replace, "replace")),
            b"restart" => Some((KeywordKind::Restart, "restart")),
            b"session" => Some((KeywordKind::Session, "session")),
            b"storage" => Some((KeywordKind::Storage, "storage")),
            b"varchar" => Some((KeywordKind::Varchar, "varchar")),
            b"version" => Some((KeywordKind::Version, "version")),
            b"without" => Some((KeywordKind::Without, "without")),
            _ => None,
        },
        8 => match text {
            b"absolute" => Some((KeywordKind::Absolute, "absolute")),
            b"cascaded" => Some((KeywordKind::Cascaded, "cascaded")),
            b"continue" => Some((KeywordKind::Continue, "continue")),
            b"database" => Some((KeywordKind::Database, "database")),
            b"deferred" => Some((KeywordKind::Deferred, "deferred")),
            b"distinct" => Some((KeywordKind::Distinct, "distinct")),
            b"function" => Some((KeywordKind::Function, "function")),
            b"language" => Some((KeywordKind::Language, "language")),
            b"operator" => Some((KeywordKind::Operator, "operator")),
            b"overlaps" => Some((KeywordKind::Overlaps, "overlaps")),
            b"relative" => Some((KeywordKind::Relative, "relative")),
            b"sequence" => Some((KeywordKind::Sequence, "sequence")),
            b"template" => Some((KeywordKind::Template, "template")),
            b"truncate" => Some((KeywordKind::Truncate, "truncate")),
            b"variable" => Some((KeywordKind::Variable, "variable")),
            _ => None,
        },
        9 => match text {
            b"character" => Some((KeywordKind::Character, "character")),
            b"immediate" => Some((KeywordKind::Immediate, "immediate")),
            b"precision" => Some((KeywordKind::Precision, "precision")),
            b"procedure" => Some((KeywordKind::Procedure, "procedure")),
            b"recursive" => Some((KeywordKind::Recursive, "recursive")),
            b"savepoint" => Some((KeywordKind::Savepoint, "savepoint")),
            b"statement" => Some((KeywordKind::Statement, "statement")),
            b"temporary" => Some((KeywordKind::Temporary, "temporary")),
            b"transform" => Some((KeywordKind::Transform, "transform")),
            _ => None,
        },
        10 => match text {
            b"constraint" => Some((KeywordKind::Constraint, "constraint")),
            b"deallocate" => Some((KeywordKind::Deallocate, "deallocate")),
            b"deferrable" => Some((KeywordKind::Deferrable, "deferrable")),
            b"references" => Some((KeywordKind::References, "references")),
            _ => None,
        },
        _ => None,
    }
}
