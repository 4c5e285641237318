//! MQTT client task
//!
//! Keeps one subscription to the heat status topic alive and forwards every
//! received message to the display task. Pings go out without waiting on
//! the reply; PINGRESP is picked up by the same poll that delivers
//! messages, so a publish racing a ping is still forwarded. Transport
//! failures end the session; the task waits `reconnect_ms` and starts a new
//! one. Displays keep whatever they were showing in between.

use defmt::*;
use embassy_net::tcp::{ConnectError, TcpSocket};
use embassy_net::{Ipv4Address, Stack};
use embassy_time::{Duration, Instant, Timer};
use heapless::Vec;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::client::raw_client::{Event, RawMqttClient};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::packet::v5::reason_codes::ReasonCode;
use rust_mqtt::utils::rng_generator::CountingRng;

use ondeck_core::config::MqttConfig;
use ondeck_core::station::{InboundMessage, MAX_PAYLOAD_LEN};

use crate::channels::INBOUND;

/// TCP socket buffer size, each direction
const SOCKET_BUF_SIZE: usize = 1024;

/// MQTT packet buffer size, each direction
const PACKET_BUF_SIZE: usize = 512;

// Every payload that fits a packet must fit the display channel
const _: () = assert!(MAX_PAYLOAD_LEN >= PACKET_BUF_SIZE);

/// Maximum MQTT v5 properties per packet
const MAX_PROPERTIES: usize = 5;

/// Why a session ended
#[derive(Debug)]
enum SessionError {
    Connect(ConnectError),
    Mqtt(ReasonCode),
}

impl From<ReasonCode> for SessionError {
    fn from(code: ReasonCode) -> Self {
        SessionError::Mqtt(code)
    }
}

impl From<ConnectError> for SessionError {
    fn from(e: ConnectError) -> Self {
        SessionError::Connect(e)
    }
}

/// MQTT task - connect, subscribe, poll, reconnect
#[embassy_executor::task]
pub async fn mqtt_task(stack: Stack<'static>, config: &'static MqttConfig) {
    let mut rx_buffer = [0u8; SOCKET_BUF_SIZE];
    let mut tx_buffer = [0u8; SOCKET_BUF_SIZE];
    let mut write_buffer = [0u8; PACKET_BUF_SIZE];
    let mut recv_buffer = [0u8; PACKET_BUF_SIZE];

    loop {
        info!("Connecting to MQTT...");
        let ended = run_session(
            stack,
            config,
            &mut rx_buffer,
            &mut tx_buffer,
            &mut write_buffer,
            &mut recv_buffer,
        )
        .await;

        match ended {
            Err(SessionError::Connect(e)) => warn!("Disconnected from MQTT: {}", e),
            Err(SessionError::Mqtt(code)) => {
                warn!("Disconnected from MQTT: {}", Debug2Format(&code))
            }
        }

        Timer::after_millis(u64::from(config.reconnect_ms)).await;
    }
}

/// One broker session; only returns on failure
async fn run_session(
    stack: Stack<'static>,
    config: &MqttConfig,
    rx_buffer: &mut [u8],
    tx_buffer: &mut [u8],
    write_buffer: &mut [u8],
    recv_buffer: &mut [u8],
) -> Result<core::convert::Infallible, SessionError> {
    let [a, b, c, d] = config.broker;
    let broker = (Ipv4Address::new(a, b, c, d), config.port);
    let keepalive = Duration::from_secs(u64::from(config.keepalive_s));

    let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(u64::from(config.keepalive_s).max(10) * 2)));
    socket.connect(broker).await?;
    debug!("TCP connected to {}.{}.{}.{}:{}", a, b, c, d, config.port);

    let mut client_config = ClientConfig::new(MqttVersion::MQTTv5, CountingRng(20000));
    client_config.add_max_subscribe_qos(QualityOfService::QoS0);
    client_config.add_client_id(config.client_id.as_str());
    client_config.max_packet_size = PACKET_BUF_SIZE as u32;
    client_config.keep_alive = config.keepalive_s;

    let write_len = write_buffer.len();
    let recv_len = recv_buffer.len();
    let mut client = RawMqttClient::<_, MAX_PROPERTIES, _>::new(
        socket,
        write_buffer,
        write_len,
        recv_buffer,
        recv_len,
        client_config,
    );

    client.connect_to_broker().await?;
    match client.poll::<0>().await? {
        Event::Connack => {}
        Event::Disconnect(code) => return Err(code.into()),
        _ => return Err(ReasonCode::ImplementationSpecificError.into()),
    }

    let mut topics = Vec::<&str, 1>::new();
    topics
        .push(config.topic.as_str())
        .map_err(|_| ReasonCode::BuffError)?;
    let subscription = client.subscribe_to_topics(&topics).await?;
    match client.poll::<1>().await? {
        Event::Suback(id) if id == subscription => {}
        Event::Suback(_) => return Err(ReasonCode::PacketIdentifierNotFound.into()),
        Event::Disconnect(code) => return Err(code.into()),
        _ => return Err(ReasonCode::ImplementationSpecificError.into()),
    }
    info!(
        "Connected to MQTT! Listening for topic changes on {}",
        config.topic.as_str()
    );

    // Ping at half the keepalive so the broker never times us out
    let ping_every = keepalive / 2;
    let poll_timeout = Duration::from_millis(u64::from(config.poll_timeout_ms));
    let idle = Duration::from_millis(u64::from(config.idle_ms));
    let mut last_ping = Instant::now();
    let mut awaiting_pong = false;
    let mut window = Instant::now();

    loop {
        // Only start reading once bytes are buffered, so a read is never
        // abandoned half way through a packet
        match client.poll_if_ready::<1>().await? {
            Some(Event::Message(topic, payload)) => forward(topic, payload).await,
            Some(Event::Pingresp) => {
                awaiting_pong = false;
                trace!("Keepalive ping acknowledged");
            }
            Some(Event::Disconnect(code)) => return Err(code.into()),
            Some(_) => trace!("Ignoring unexpected packet"),
            None if window.elapsed() < poll_timeout => {
                Timer::after(idle).await;
                continue;
            }
            None => trace!("No message within poll timeout"),
        }
        window = Instant::now();

        if awaiting_pong {
            if last_ping.elapsed() >= keepalive {
                return Err(ReasonCode::KeepAliveTimeout.into());
            }
        } else if last_ping.elapsed() >= ping_every {
            client.send_ping().await?;
            last_ping = Instant::now();
            awaiting_pong = true;
        }

        Timer::after(idle).await;
    }
}

/// Copy a message out of the client's buffer and queue it for the displays
async fn forward(topic: &str, payload: &[u8]) {
    match InboundMessage::new(topic, payload) {
        Ok(message) => INBOUND.send(message).await,
        Err(e) => warn!(
            "Dropping message on topic {} ({} bytes): {}",
            topic,
            payload.len(),
            e
        ),
    }
}
