/// 库层错误类型。
///
/// 这些错误都是致命的：构图或遍历遇到它们会直接中止，不做部分恢复。
/// “找不到路径”不是错误，见 [`crate::graph::path`]。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 打分矩阵收到了字母表之外、也不是 gap 的字符
    #[error("invalid symbol {symbol:?} for BLOSUM62 lookup")]
    InvalidSymbol { symbol: char },

    /// 输入序列中含有非法残基（构图前校验）
    #[error("sequence {sequence}: invalid residue {symbol:?} at offset {position}")]
    InvalidResidue {
        sequence: usize,
        position: usize,
        symbol: char,
    },

    /// 图描述文件结构错误（字段缺失、引用未声明的顶点、违反拓扑序等）
    #[error("malformed graph description at line {line}: {reason}")]
    MalformedGraph { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedGraph {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
