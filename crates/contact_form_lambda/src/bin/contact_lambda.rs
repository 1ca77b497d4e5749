use contact_form_lambda::adapters::resend::ResendEmailSender;
use contact_form_lambda::config::{env_lookup, ContactHandlerConfig, ResendSettings};
use contact_form_lambda::handlers::contact::handle_contact_event;
use contact_form_lambda::handlers::gateway::ApiGatewayResponse;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = ResendSettings::from_lookup(env_lookup).map_err(Error::from)?;
    let config = ContactHandlerConfig::from_lookup(env_lookup);
    let sender = ResendEmailSender::new(&settings).map_err(Error::from)?;

    let config = &config;
    let sender = &sender;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ApiGatewayResponse, Error>(handle_contact_event(event.payload, config, sender))
    }))
    .await
}
