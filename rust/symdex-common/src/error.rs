use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn unknown_symbol(id: u32) -> Error {
        ErrorKind::UnknownSymbol { id }.into()
    }

    pub fn unknown_symbol_name(name: impl Into<String>) -> Error {
        ErrorKind::UnknownSymbolName { name: name.into() }.into()
    }

    pub fn unknown_level(name: impl Into<String>) -> Error {
        ErrorKind::UnknownLevel { name: name.into() }.into()
    }

    pub fn invalid_aggregation_target(level: impl Into<String>) -> Error {
        ErrorKind::InvalidAggregationTarget {
            level: level.into(),
        }
        .into()
    }

    pub fn malformed_decomposition(
        level: impl Into<String>,
        symbol: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        ErrorKind::MalformedDecomposition {
            level: level.into(),
            symbol: symbol.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn persistence(context: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::Persistence {
            context: context.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn count_overflow(context: impl Into<String>, symbol: u32) -> Error {
        ErrorKind::CountOverflow {
            context: context.into(),
            symbol,
        }
        .into()
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        ErrorKind::Io {
            context: context.into(),
            source,
        }
        .into()
    }

    /// Wraps an arbitrary decomposer or corpus failure.
    pub fn external<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ErrorKind::External {
            context: context.into(),
            source: Box::new(source),
        }
        .into()
    }

    /// `true` for a lookup of an id or name that was never interned.
    pub fn is_unknown_symbol(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnknownSymbol { .. } | ErrorKind::UnknownSymbolName { .. }
        )
    }

    /// `true` for an unrecognized level or a level that is not valid for the request.
    pub fn is_unknown_level(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnknownLevel { .. } | ErrorKind::InvalidAggregationTarget { .. }
        )
    }

    pub fn is_malformed_decomposition(&self) -> bool {
        matches!(self.kind(), ErrorKind::MalformedDecomposition { .. })
    }

    pub fn is_count_overflow(&self) -> bool {
        matches!(self.kind(), ErrorKind::CountOverflow { .. })
    }

    /// `true` for snapshot failures, including the I/O errors underneath them.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Persistence { .. } | ErrorKind::Io { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("unknown symbol id {id}")]
    UnknownSymbol { id: u32 },

    #[error("unknown symbol '{name}'")]
    UnknownSymbolName { name: String },

    #[error("unknown level '{name}'")]
    UnknownLevel { name: String },

    #[error("level {level} is not a valid aggregation target")]
    InvalidAggregationTarget { level: String },

    #[error("malformed decomposition of '{symbol}' at level {level}: {message}")]
    MalformedDecomposition {
        level: String,
        symbol: String,
        message: String,
    },

    #[error("invalid snapshot '{context}': {message}")]
    Persistence { context: String, message: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("occurrence count of symbol {symbol} overflows in {context}")]
    CountOverflow { context: String, symbol: u32 },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    External {
        context: String,
        source: StdErrorBoxed,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}
