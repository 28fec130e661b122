//! コンパイラのメイン処理モジュール
//!
//! このモジュールは、字句解析から命令列の生成、LLVMへの変換、JIT実行までの
//! パイプライン全体を管理します。各段階のエラーは診断情報として蓄積され、
//! codespan-reportingで報告されます。

use crate::ast::Program;
use crate::backend::{LlvmBackend, LoweredModule};
use crate::codegen::{CodeGenerator, CompiledFunction};
use crate::error::{DiagnosticError, ErrorCollector, LexerError, WistError, WistResult};
use crate::lexer::{Lexer, Token, TokenWithPosition};
use crate::parser::Parser;
use crate::runtime::Runtime;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use inkwell::context::Context;
use inkwell::OptimizationLevel;
use std::fs;
use std::path::Path;

/// コンパイラの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompilerOptions {
    /// 最適化レベル（0-3）
    pub opt_level: u8,
    /// 詳細出力
    pub verbose: bool,
}

impl CompilerOptions {
    /// LLVMの最適化レベルに変換（3より大きい値は3として扱う）
    pub fn llvm_opt_level(&self) -> OptimizationLevel {
        match self.opt_level {
            0 => OptimizationLevel::None,
            1 => OptimizationLevel::Less,
            2 => OptimizationLevel::Default,
            _ => OptimizationLevel::Aggressive,
        }
    }
}

/// コンパイル状態を管理する構造体
pub struct CompilationState {
    pub source_file: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
    pub error_collector: ErrorCollector,
}

impl CompilationState {
    /// 新しいコンパイル状態を作成
    pub fn new<P: AsRef<Path>>(source_file: P) -> WistResult<Self> {
        let source_file_str = source_file.as_ref().display().to_string();
        let source = fs::read_to_string(source_file.as_ref())
            .map_err(|e| WistError::Io(format!("Failed to read source file: {}", e)))?;

        Self::new_from_string(&source_file_str, source)
    }

    /// 文字列からコンパイル状態を作成
    pub fn new_from_string(filename: &str, source: String) -> WistResult<Self> {
        let mut files = SimpleFiles::new();
        let file_id = files.add(filename.to_string(), source.clone());

        Ok(Self {
            source_file: filename.to_string(),
            source,
            files,
            file_id,
            error_collector: ErrorCollector::new(),
        })
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: WistError) {
        self.error_collector.add_error(error, self.file_id);
    }

    /// 診断情報を報告
    pub fn report_diagnostics(&self) -> WistResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();

        for error in self.error_collector.errors() {
            let diagnostic = error.to_diagnostic();
            codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, &diagnostic)
                .map_err(|e| WistError::Io(format!("Failed to emit diagnostic: {}", e)))?;
        }

        Ok(())
    }

    /// エラーがあるかチェック
    pub fn has_errors(&self) -> bool {
        self.error_collector.has_errors()
    }

    /// エラー数を取得
    pub fn error_count(&self) -> usize {
        self.error_collector.error_count()
    }

    /// 最初のエラーを取得
    pub fn first_error(&self) -> Option<&DiagnosticError> {
        self.error_collector.first_error()
    }
}

/// コンパイルパイプライン
pub struct CompilationPipeline<'ctx> {
    state: CompilationState,
    context: &'ctx Context,
    options: CompilerOptions,
}

impl<'ctx> CompilationPipeline<'ctx> {
    /// 新しいコンパイルパイプラインを作成
    pub fn new(state: CompilationState, context: &'ctx Context, options: CompilerOptions) -> Self {
        Self {
            state,
            context,
            options,
        }
    }

    /// コンパイル状態への参照を取得
    pub fn state(&self) -> &CompilationState {
        &self.state
    }

    /// 段階の開始を通知（verbose時は標準エラーに表示）
    fn step(&self, message: &str) {
        if self.options.verbose {
            eprintln!("ステップ: {}", message);
        } else {
            log::debug!("ステップ: {}", message);
        }
    }

    /// レキシカル解析を実行
    ///
    /// 不正なトークンはすべてエラーとして記録する。
    pub fn tokenize(&mut self) -> Vec<TokenWithPosition> {
        self.step("レキシカル解析を開始");

        let tokens = Lexer::new(&self.state.source).collect_tokens();

        for token in &tokens {
            if matches!(token.token, Token::Error) {
                let text = self
                    .state
                    .source
                    .get(token.span.clone())
                    .unwrap_or("不明")
                    .to_string();
                self.state.add_error(WistError::Lexer(LexerError::UnrecognizedToken {
                    token: text,
                    span: token.span.clone().into(),
                }));
            }
        }

        tokens
    }

    /// 構文解析を実行
    pub fn parse(&mut self, tokens: Vec<TokenWithPosition>) -> Option<Program> {
        self.step("構文解析を開始");

        let mut parser = Parser::new(tokens);
        match parser.parse() {
            Ok(program) => Some(program),
            Err(e) => {
                self.state.add_error(WistError::Parser(e));
                None
            }
        }
    }

    /// 構文木を命令列にコンパイル
    pub fn compile_program(&mut self, program: &Program) -> Option<CompiledFunction> {
        self.step("命令列の生成を開始");

        match CodeGenerator::new().compile_program(program) {
            Ok(function) => Some(function),
            Err(e) => {
                self.state.add_error(WistError::Compile(e));
                None
            }
        }
    }

    /// LLVMモジュールに変換
    pub fn lower(&self, function: &CompiledFunction) -> WistResult<LoweredModule<'ctx>> {
        self.step("LLVMへの変換を開始");

        let backend = LlvmBackend::new(self.context, &self.state.source_file);
        Ok(backend.lower(function)?)
    }

    /// JITで実行
    pub fn execute(&self, lowered: &LoweredModule<'ctx>) -> WistResult<i64> {
        self.step("JIT実行を開始");

        let runtime = Runtime::new(self.options.llvm_opt_level());
        Ok(runtime.execute(lowered)?)
    }

    /// 字句解析から命令列の生成までを実行
    ///
    /// エラーは報告せずに蓄積する。字句エラーがあれば構文解析に進まない。
    pub fn compile(&mut self) -> Option<CompiledFunction> {
        let tokens = self.tokenize();
        if self.state.has_errors() {
            return None;
        }

        let program = self.parse(tokens)?;
        self.compile_program(&program)
    }

    /// エラーレポートを生成
    pub fn report_errors(&self) -> WistResult<()> {
        self.state.report_diagnostics()?;

        if self.state.has_errors() {
            eprintln!(
                "\nコンパイルエラー: {} 個のエラーが見つかりました",
                self.state.error_count()
            );
        }

        Ok(())
    }

    /// パイプライン全体を実行
    pub fn run(&mut self) -> WistResult<Option<CompiledFunction>> {
        let compiled = self.compile();
        self.report_errors()?;
        Ok(compiled)
    }
}

/// ソース文字列を命令列にコンパイル（最初のエラーを返す）
pub fn compile_source(source: &str) -> WistResult<CompiledFunction> {
    let context = Context::create();
    let state = CompilationState::new_from_string("<source>", source.to_string())?;
    let mut pipeline = CompilationPipeline::new(state, &context, CompilerOptions::default());

    match pipeline.compile() {
        Some(function) => Ok(function),
        None => Err(first_error(pipeline.state())),
    }
}

/// ソース文字列をコンパイルしてJIT実行
pub fn evaluate(source: &str, options: CompilerOptions) -> WistResult<i64> {
    let context = Context::create();
    let state = CompilationState::new_from_string("<source>", source.to_string())?;
    let mut pipeline = CompilationPipeline::new(state, &context, options);

    let function = pipeline
        .compile()
        .ok_or_else(|| first_error(pipeline.state()))?;
    let lowered = pipeline.lower(&function)?;
    pipeline.execute(&lowered)
}

fn first_error(state: &CompilationState) -> WistError {
    state
        .first_error()
        .map(|e| e.error.clone())
        .unwrap_or_else(|| WistError::Other("コンパイルに失敗しました".to_string()))
}
