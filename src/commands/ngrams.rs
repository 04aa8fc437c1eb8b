use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{Category, Example, LabeledError, PipelineData, Signature, SyntaxShape, Type};

use super::util::{filter_flags, filter_from_call, input_rows, labeled, output, usize_flag};
use crate::algo::ngram::Boundary;
use crate::ops;
use crate::SentimentPlugin;

pub struct Ngrams;

impl PluginCommand for Ngrams {
    type Plugin = SentimentPlugin;

    fn name(&self) -> &str {
        "sentiment ngrams"
    }

    fn description(&self) -> &str {
        "Most frequent word n-grams in the pre-tokenized text of a table"
    }

    fn signature(&self) -> Signature {
        filter_flags(Signature::build(self.name()))
            .input_output_type(Type::table(), Type::record())
            .named(
                "size",
                SyntaxShape::Int,
                "N-gram width (default: 1)",
                Some('n'),
            )
            .named(
                "top",
                SyntaxShape::Int,
                "Number of n-grams to keep (default: 10)",
                Some('k'),
            )
            .named(
                "boundary",
                SyntaxShape::String,
                "Window boundary: stream (span rows) or row (default: stream)",
                Some('b'),
            )
            .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["ngram", "bigram", "phrase", "frequency", "tokens"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![
            Example {
                example: "open comments.json | sentiment ngrams --size 2",
                description: "Top 10 bigrams across all rows",
                result: None,
            },
            Example {
                example: "open comments.json | sentiment ngrams --type comment --sentiment negative --top 5",
                description: "Top 5 unigrams in negative comments",
                result: None,
            },
        ]
    }

    fn run(
        &self,
        plugin: &SentimentPlugin,
        _engine: &EngineInterface,
        call: &EvaluatedCall,
        input: PipelineData,
    ) -> Result<PipelineData, LabeledError> {
        let head = call.head;
        let filter = filter_from_call(call)?;
        let n = usize_flag(call, "size")?.unwrap_or(1);
        let top_k = usize_flag(call, "top")?.unwrap_or(plugin.config.ngrams.top_k);
        let boundary = match call.get_flag::<String>("boundary")? {
            Some(s) => Boundary::from_str(&s).ok_or_else(|| {
                LabeledError::new(format!("Unknown boundary '{s}'. Use: stream, row"))
                    .with_label("invalid boundary", head)
            })?,
            None => plugin.config.ngrams.boundary,
        };

        let rows = input_rows(input);
        let result =
            ops::op_ngrams(&rows, &filter, n, top_k, boundary).map_err(|e| labeled(e, head))?;
        Ok(output(&result, head))
    }
}
