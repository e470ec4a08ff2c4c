use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voip_push::{
    CallAction, CallActionRequest, CallParams, CallType, Caller, PayloadBuilder, PushTarget,
    PushTransport,
    clients::{fcm::FcmClient, onesignal::OneSignalClient},
    config::Config,
    models::call::OrderContext,
    utils::{send_call_action, send_call_notification},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Send test VoIP call notifications to the driver app", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a voice call notification through OneSignal
    Voice(TargetArgs),

    /// Send a video call notification through OneSignal
    Video(TargetArgs),

    /// Send a call action update through OneSignal
    Action {
        #[arg(value_enum)]
        action: ActionArg,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Voice, video, then accepted/declined/ended to one target
    All(TargetArgs),

    /// Ring a specific user
    Test {
        user_id: String,

        #[arg(value_enum, default_value = "voice")]
        call_type: CallTypeArg,
    },

    /// Send a call notification straight to a device through FCM
    Fcm {
        #[arg(value_enum, default_value = "voice")]
        call_type: CallTypeArg,

        /// Defaults to FCM_TEST_DEVICE_TOKEN
        device_token: Option<String>,

        /// Omit the visible alert and let the app draw its own call screen
        #[arg(long)]
        data_only: bool,
    },
}

#[derive(Args, Debug, Clone)]
struct TargetArgs {
    /// External user id (recommended)
    user_id: Option<String>,

    /// OneSignal player id, used when no user id is given
    player_id: Option<String>,

    /// Send data only, without an OS-rendered alert
    #[arg(long)]
    data_only: bool,
}

impl TargetArgs {
    /// Empty strings count as absent so `voice "" <player>` targets a player.
    fn target(&self) -> PushTarget {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty() && v != "\"\"");

        match (non_empty(&self.user_id), non_empty(&self.player_id)) {
            (Some(user_id), _) => PushTarget::ExternalId(user_id),
            (None, Some(player_id)) => PushTarget::PlayerId(player_id),
            (None, None) => PushTarget::Segment("All".to_string()),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum CallTypeArg {
    Voice,
    Video,
}

impl From<CallTypeArg> for CallType {
    fn from(arg: CallTypeArg) -> Self {
        match arg {
            CallTypeArg::Voice => CallType::Voice,
            CallTypeArg::Video => CallType::Video,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ActionArg {
    Accepted,
    Declined,
    Ended,
}

impl From<ActionArg> for CallAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Accepted => CallAction::Accepted,
            ActionArg::Declined => CallAction::Declined,
            ActionArg::Ended => CallAction::Ended,
        }
    }
}

const FIXTURE_DRIVER_ID: &str = "quick-driver-123";

fn fixture_caller(call_type: CallType) -> Caller {
    match call_type {
        CallType::Voice => Caller::new("quick-client-123", "Ahmed")
            .with_last_name("Ben Salem")
            .with_phone_number("+21612345678"),
        CallType::Video => Caller::new("quick-client-456", "Sarah")
            .with_last_name("Trabelsi")
            .with_phone_number("+21612345679"),
    }
}

fn fixture_order() -> OrderContext {
    let order = json!({
        "id": "quick-order-456",
        "pickup": "Tunis, Tunisia",
        "dropoff": "Sousse, Tunisia",
        "status": "in_progress",
    });

    match order {
        serde_json::Value::Object(map) => map,
        _ => OrderContext::new(),
    }
}

fn driver_id_for(target: &PushTarget) -> String {
    match target {
        PushTarget::ExternalId(id) => id.clone(),
        _ => FIXTURE_DRIVER_ID.to_string(),
    }
}

async fn send_call(
    config: &Config,
    transport: &dyn PushTransport,
    call_type: CallType,
    target: PushTarget,
    data_only: bool,
) -> Result<(), Error> {
    let caller = fixture_caller(call_type);
    let order = fixture_order();
    let driver_id = driver_id_for(&target);

    let order_id = order.get("id").and_then(|v| v.as_str()).unwrap_or_default();
    let channel_name = config
        .channel_generator()
        .generate(order_id, &driver_id, &caller.id);

    let params = CallParams {
        driver_id: Some(driver_id),
        caller: Some(caller.into()),
        channel_name: Some(channel_name.clone()),
        call_type: Some(call_type),
        order_data: Some(order),
    };

    let builder = PayloadBuilder::new(config.payload_options(data_only));
    let receipt = send_call_notification(params, &builder, transport, Some(target)).await?;

    println!("✅ {} call sent: {}", call_type, receipt.message_id);
    println!("📞 Channel: {}", channel_name);

    Ok(())
}

async fn send_action(
    config: &Config,
    transport: &dyn PushTransport,
    action: CallAction,
    target: PushTarget,
) -> Result<(), Error> {
    let caller = fixture_caller(CallType::Voice);
    let driver_id = driver_id_for(&target);
    let channel_name = config
        .channel_generator()
        .generate("quick-order-456", &driver_id, &caller.id);

    let request = CallActionRequest {
        driver_id,
        action,
        caller,
        channel_name,
        order_data: fixture_order(),
    };

    let builder = PayloadBuilder::new(config.payload_options(false));
    let receipt = send_call_action(&request, &builder, transport, Some(target)).await?;

    println!("✅ {} action sent: {}", request.action, receipt.message_id);

    Ok(())
}

async fn run_all(config: &Config, transport: &dyn PushTransport, args: &TargetArgs) -> Result<(), Error> {
    let target = args.target();

    info!("Voice call test");
    send_call(config, transport, CallType::Voice, target.clone(), args.data_only).await?;
    sleep(Duration::from_secs(2)).await;

    info!("Video call test");
    send_call(config, transport, CallType::Video, target.clone(), args.data_only).await?;
    sleep(Duration::from_secs(2)).await;

    info!("Call action tests");
    for action in [CallAction::Accepted, CallAction::Declined, CallAction::Ended] {
        send_action(config, transport, action, target.clone()).await?;
        sleep(Duration::from_secs(1)).await;
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = Config::load()?;

    init_tracing(config.log_json);

    let _ = rustls::crypto::ring::default_provider().install_default();

    match cli.command {
        Command::Voice(args) => {
            let onesignal = OneSignalClient::new(&config)?;
            send_call(&config, &onesignal, CallType::Voice, args.target(), args.data_only).await
        }
        Command::Video(args) => {
            let onesignal = OneSignalClient::new(&config)?;
            send_call(&config, &onesignal, CallType::Video, args.target(), args.data_only).await
        }
        Command::Action { action, target } => {
            let onesignal = OneSignalClient::new(&config)?;
            send_action(&config, &onesignal, action.into(), target.target()).await
        }
        Command::All(args) => {
            let onesignal = OneSignalClient::new(&config)?;
            run_all(&config, &onesignal, &args).await
        }
        Command::Test { user_id, call_type } => {
            let onesignal = OneSignalClient::new(&config)?;
            send_call(
                &config,
                &onesignal,
                call_type.into(),
                PushTarget::ExternalId(user_id),
                false,
            )
            .await
        }
        Command::Fcm {
            call_type,
            device_token,
            data_only,
        } => {
            let device_token = device_token
                .or_else(|| config.fcm_test_device_token.clone())
                .ok_or_else(|| anyhow!("No device token given and FCM_TEST_DEVICE_TOKEN is not set"))?;

            let fcm = FcmClient::new(&config)?;
            send_call(
                &config,
                &fcm,
                call_type.into(),
                PushTarget::DeviceToken(device_token),
                data_only,
            )
            .await
        }
    }
}
