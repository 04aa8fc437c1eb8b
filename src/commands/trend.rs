use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{Category, Example, LabeledError, PipelineData, Signature, Type};

use super::util::{filter_flags, filter_from_call, input_rows, output};
use crate::ops;
use crate::SentimentPlugin;

pub struct Trend;

impl PluginCommand for Trend {
    type Plugin = SentimentPlugin;

    fn name(&self) -> &str {
        "sentiment trend"
    }

    fn description(&self) -> &str {
        "Count rows per calendar day and sentiment"
    }

    fn signature(&self) -> Signature {
        filter_flags(Signature::build(self.name()))
            .input_output_type(Type::table(), Type::table())
            .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["trend", "daily", "timeseries", "date"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![Example {
            example: "open comments.json | sentiment trend --page Life_Car",
            description: "Daily sentiment counts for one topic",
            result: None,
        }]
    }

    fn run(
        &self,
        _plugin: &SentimentPlugin,
        _engine: &EngineInterface,
        call: &EvaluatedCall,
        input: PipelineData,
    ) -> Result<PipelineData, LabeledError> {
        let filter = filter_from_call(call)?;
        let rows = input_rows(input);
        Ok(output(&ops::op_trend(&rows, &filter), call.head))
    }
}
