// src/ingest.rs
//! Async ingestion loop driving a tracker from any byte source

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};

use crate::error::Result;
use crate::tracker::GpsTracker;

const READ_CHUNK: usize = 512;

/// Pump bytes from `reader` into `tracker` until end of stream.
///
/// This is the only writer of the tracker's state. Returns the number of
/// sentences applied.
pub async fn run<R>(mut reader: R, tracker: &mut GpsTracker) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; READ_CHUNK];
    let mut applied: u64 = 0;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            info!(applied, "byte source reached end of stream");
            break;
        }

        let count = tracker.feed(&buf[..n]);
        if count > 0 {
            debug!(bytes = n, sentences = count, "ingested chunk");
        }
        applied += count as u64;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::data::FixType;

    #[tokio::test]
    async fn test_run_over_in_memory_stream() {
        let data: &[u8] = b"\x00\xff junk\r\n\
            $GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
            $GPGSA,A,2,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39\r\n\
            $GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n\
            $GPGGA,truncated";

        let mut tracker = GpsTracker::new();
        let reader = tracker.reader();

        let applied = run(data, &mut tracker).await.unwrap();
        assert_eq!(applied, 3);

        let fix = reader.snapshot();
        assert_eq!(fix.satellites(), 8);
        assert_eq!(fix.fix_type(), FixType::Fix2D);
        assert_eq!(fix.valid_message_count(), 2);
        assert!((fix.speed_over_ground() - 22.4 * 0.514444).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_run_empty_stream() {
        let mut tracker = GpsTracker::new();
        let applied = run(tokio::io::empty(), &mut tracker).await.unwrap();
        assert_eq!(applied, 0);
        assert_eq!(tracker.fix().valid_message_count(), 0);
    }
}
