use nu_plugin::{serve_plugin, MsgPackSerializer};
use nu_plugin_sentiment::SentimentPlugin;

fn main() {
    serve_plugin(&SentimentPlugin::new(), MsgPackSerializer {})
}
