//! stdin bridge for the CLI
//!
//! Reads message events line by line, hands each JSON line to the relay,
//! and reports the final page address when the input ends.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use videobridge_core::{consume_video_ended, AddressBar, Relay, Result, StdoutMessagePort};

/// Run the relay against stdin until EOF or Ctrl-C.
pub async fn run_stdin_bridge(
    initial_url: &str,
    target_origin: &str,
    json_output: bool,
    consume: bool,
) -> Result<()> {
    let address_bar = AddressBar::parse(initial_url)?;
    let port = StdoutMessagePort::new(json_output);
    let relay = Relay::new(address_bar.clone(), port).with_target_origin(target_origin);

    let (tx, rx) = mpsc::unbounded_channel();
    let subscription = relay.subscribe(rx);
    tracing::info!(
        subscription = %subscription.id(),
        url = %address_bar.current(),
        "bridge started"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        match serde_json::from_str::<serde_json::Value>(&line) {
                            Ok(message) => {
                                if tx.send(message).is_err() {
                                    break;
                                }
                            }
                            // Anything that isn't JSON can't carry a type tag
                            Err(_) => tracing::debug!("ignoring non-JSON input line"),
                        }
                    }
                    Ok(None) => {
                        tracing::info!("stdin closed");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("error reading stdin: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    // Let the relay drain whatever is still queued.
    drop(tx);
    subscription.join().await;

    if consume {
        match consume_video_ended(&address_bar) {
            Some(video_id) => println!("consumed video_ended: {video_id}"),
            None => println!("no video_ended parameter to consume"),
        }
    }

    println!("final url: {}", address_bar.current());
    println!("history entries pushed: {}", address_bar.history_len() - 1);

    Ok(())
}
