//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、Wistコンパイラ全体で使用される統一的なエラー型と
//! エラー報告システムを提供します。コンパイルエラーはすべて致命的で、
//! 最初に見つかったエラーでその関数のコンパイルを打ち切ります。

use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// Wistコンパイラの統一エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WistError {
    /// レキサーエラー
    #[error("字句解析エラー: {0}")]
    Lexer(#[from] LexerError),

    /// パーサーエラー
    #[error("構文解析エラー: {0}")]
    Parser(#[from] ParserError),

    /// コンパイルエラー（構文木から命令列への変換）
    #[error("コンパイルエラー: {0}")]
    Compile(#[from] CompileError),

    /// LLVMへの変換エラー
    #[error("コード生成エラー: {0}")]
    Codegen(#[from] CodegenError),

    /// 実行時エラー
    #[error("実行エラー: {0}")]
    Runtime(#[from] RuntimeError),

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),

    /// その他のエラー
    #[error("{0}")]
    Other(String),
}

/// レキサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("認識できないトークン: '{token}'")]
    UnrecognizedToken { token: String, span: Span },
}

/// パーサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("予期しないトークン: {expected}を期待しましたが、{found}が見つかりました")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("予期しない入力の終了: {expected}を期待していました")]
    UnexpectedEof { expected: String, span: Span },
}

/// コンパイルエラーの詳細
///
/// 構文木を命令列へ変換する1回の走査の中で検出される。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("サポートされていない型: {name}")]
    UnsupportedType { name: String, span: Span },

    #[error("変数 {name} は既に宣言されています")]
    DuplicateDeclaration {
        name: String,
        span: Span,
        previous: Span,
    },

    #[error("未宣言の識別子: {name}")]
    UndeclaredIdentifier { name: String, span: Span },

    #[error("不正な演算子: '{operator}'")]
    InvalidOperator { operator: String, span: Span },

    #[error("整数リテラル {literal} は範囲外です")]
    LiteralOverflow { literal: String, span: Span },

    #[error("関数 {function} にreturn文がありません")]
    MissingReturn { function: String, span: Span },

    #[error("return文が複数あります")]
    MultipleReturns { span: Span, previous: Span },

    #[error("return文の後に文があります")]
    UnreachableStatement { span: Span },

    #[error("代入先は識別子でなければなりません")]
    InvalidAssignmentTarget { span: Span },

    #[error("連鎖した代入はサポートされていません")]
    ChainedAssignment { span: Span },

    #[error("サポートされていない文: {message}")]
    UnsupportedStatement { message: String, span: Span },
}

impl CompileError {
    /// エラーの主な位置
    pub fn span(&self) -> Span {
        match self {
            CompileError::UnsupportedType { span, .. }
            | CompileError::DuplicateDeclaration { span, .. }
            | CompileError::UndeclaredIdentifier { span, .. }
            | CompileError::InvalidOperator { span, .. }
            | CompileError::LiteralOverflow { span, .. }
            | CompileError::MissingReturn { span, .. }
            | CompileError::MultipleReturns { span, .. }
            | CompileError::UnreachableStatement { span }
            | CompileError::InvalidAssignmentTarget { span }
            | CompileError::ChainedAssignment { span }
            | CompileError::UnsupportedStatement { span, .. } => *span,
        }
    }
}

/// LLVMへの変換エラーの詳細
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("LLVM初期化エラー: {message}")]
    LLVMInit { message: String },

    #[error("内部エラー: {message}")]
    Internal { message: String },
}

/// 実行時エラーの詳細
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("実行エンジンを作成できません: {message}")]
    ExecutionEngine { message: String },

    #[error("エントリポイント {name} が見つかりません: {message}")]
    EntryPointNotFound { name: String, message: String },

    #[error("エントリポイントの戻り値型 {ty} は実行できません")]
    UnsupportedReturnType { ty: String },

    #[error("ゼロ除算が発生しました")]
    DivisionByZero,

    #[error("整数除算がオーバーフローしました")]
    IntegerOverflow,

    #[error("不明なトラップコード: {code}")]
    UnknownTrap { code: i32 },
}

/// エラー情報とソースコードの位置情報を含むエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: WistError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: WistError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match &self.error {
            WistError::Lexer(LexerError::UnrecognizedToken { span, .. }) => {
                vec![Label::primary(self.file_id, *span).with_message("ここに不正なトークンがあります")]
            }
            WistError::Parser(ParserError::UnexpectedToken { span, .. })
            | WistError::Parser(ParserError::UnexpectedEof { span, .. }) => {
                vec![Label::primary(self.file_id, *span)]
            }
            WistError::Compile(e) => self.compile_error_labels(e),
            WistError::Codegen(_)
            | WistError::Runtime(_)
            | WistError::Io(_)
            | WistError::Other(_) => vec![],
        };

        Diagnostic::error()
            .with_message(self.error.to_string())
            .with_labels(labels)
    }

    fn compile_error_labels(&self, e: &CompileError) -> Vec<Label<usize>> {
        let primary = Label::primary(self.file_id, e.span());
        match e {
            CompileError::DuplicateDeclaration { previous, .. } => vec![
                primary.with_message("重複した宣言"),
                Label::secondary(self.file_id, *previous).with_message("最初の宣言はここです"),
            ],
            CompileError::MultipleReturns { previous, .. } => vec![
                primary.with_message("2つ目のreturn文"),
                Label::secondary(self.file_id, *previous).with_message("最初のreturn文はここです"),
            ],
            CompileError::UndeclaredIdentifier { .. } => {
                vec![primary.with_message("この識別子はここより前で宣言されていません")]
            }
            CompileError::UnsupportedType { .. } => vec![
                primary.with_message("i8, i16, i32, i64, f32, f64 のいずれかを指定してください")
            ],
            CompileError::MissingReturn { .. } => {
                vec![primary.with_message("関数本体の最後にreturn文が必要です")]
            }
            _ => vec![primary],
        }
    }
}

/// 複数のエラーを蓄積するためのコレクター
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<DiagnosticError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: WistError, file_id: usize) {
        self.errors.push(DiagnosticError::new(error, file_id));
    }

    /// エラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// エラーの数
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// すべてのエラーを取得
    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }

    /// 最初のエラーを取得
    pub fn first_error(&self) -> Option<&DiagnosticError> {
        self.errors.first()
    }
}

/// Result型のエイリアス
pub type WistResult<T> = Result<T, WistError>;

/// コンパイラ本体のResult型
pub type CompileResult<T> = Result<T, CompileError>;

/// LLVMバックエンドのResult型
pub type CodegenResult<T> = Result<T, CodegenError>;

impl From<inkwell::builder::BuilderError> for CodegenError {
    fn from(e: inkwell::builder::BuilderError) -> Self {
        CodegenError::Internal {
            message: format!("LLVM builder error: {:?}", e),
        }
    }
}

impl From<std::io::Error> for WistError {
    fn from(e: std::io::Error) -> Self {
        WistError::Io(e.to_string())
    }
}
