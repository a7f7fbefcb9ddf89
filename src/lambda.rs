use citybike_skill::utils::{logger, validation::Validate};
use citybike_skill::{HttpSkillHandler, LambdaConfig, SkillRequest, SkillResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

async fn function_handler(
    handler: &HttpSkillHandler,
    event: LambdaEvent<SkillRequest>,
) -> Result<SkillResponse, Error> {
    tracing::debug!("Lambda request id: {}", event.context.request_id);

    let response = handler.handle(event.payload).await?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 啟動時讀取並驗證配置，之後每次呼叫共用
    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let handler = HttpSkillHandler::from_config(&config)?;
    tracing::info!("🚲 City bikes skill ready");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<SkillRequest>| async move {
        function_handler(handler, event).await
    }))
    .await
}
