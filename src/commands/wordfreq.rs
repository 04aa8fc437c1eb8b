use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{Category, Example, LabeledError, PipelineData, Signature, SyntaxShape, Type};

use super::util::{filter_flags, filter_from_call, input_rows, labeled, output, usize_flag};
use crate::ops;
use crate::SentimentPlugin;

pub struct WordFreq;

impl PluginCommand for WordFreq {
    type Plugin = SentimentPlugin;

    fn name(&self) -> &str {
        "sentiment wordfreq"
    }

    fn description(&self) -> &str {
        "Word frequencies and a seeded word-cloud layout plan"
    }

    fn signature(&self) -> Signature {
        filter_flags(Signature::build(self.name()))
            .input_output_type(Type::table(), Type::record())
            .named(
                "min-length",
                SyntaxShape::Int,
                "Shortest word kept, in characters (default: 2)",
                None,
            )
            .named(
                "max-words",
                SyntaxShape::Int,
                "Words in the cloud plan (default: 2000)",
                Some('m'),
            )
            .named(
                "seed",
                SyntaxShape::Int,
                "Random seed for the cloud layout (default: 42)",
                None,
            )
            .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["wordcloud", "frequency", "words", "stopwords"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![Example {
            example: "open comments.json | sentiment wordfreq --sentiment positive | get frequencies",
            description: "Word counts in positive rows, stopwords removed",
            result: None,
        }]
    }

    fn run(
        &self,
        plugin: &SentimentPlugin,
        _engine: &EngineInterface,
        call: &EvaluatedCall,
        input: PipelineData,
    ) -> Result<PipelineData, LabeledError> {
        let filter = filter_from_call(call)?;
        let mut config = plugin.config.wordcloud.clone();
        if let Some(v) = usize_flag(call, "min-length")? {
            config.min_word_length = v;
        }
        if let Some(v) = usize_flag(call, "max-words")? {
            config.max_words = v;
        }
        if let Some(v) = call.get_flag::<i64>("seed")? {
            config.seed = v as u64;
        }
        config.validate().map_err(|e| labeled(e, call.head))?;

        let rows = input_rows(input);
        let result = ops::op_wordfreq(&rows, &filter, &plugin.stopwords, &config);
        Ok(output(&result, call.head))
    }
}
