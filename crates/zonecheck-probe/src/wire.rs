//! Length-prefixed DNS message exchange over TCP (RFC 1035 section 4.2.2).
//!
//! Both the NS query against the caller's resolver and the AXFR exchange
//! against an authoritative server go through these helpers. Decode failures
//! surface as `InvalidData` so callers can classify them as malformed.

use std::io;

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use hickory_proto::serialize::binary::BinDecodable;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Build a single-question query message.
pub(crate) fn build_query(name: Name, rtype: RecordType, recursion_desired: bool) -> Message {
    let mut message = Message::new();
    message.set_id(rand::random::<u16>());
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(recursion_desired);
    message.add_query(Query::query(name, rtype));
    message
}

/// Write one message with the 2-byte length prefix.
pub(crate) async fn write_message(stream: &mut TcpStream, message: &Message) -> io::Result<()> {
    let body = message
        .to_vec()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let len = u16::try_from(body.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "message exceeds 64 KiB"))?;

    let mut framed = Vec::with_capacity(body.len() + 2);
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(&body);
    stream.write_all(&framed).await
}

/// Read one length-prefixed message.
///
/// Returns `Ok(None)` on a clean close between messages; EOF inside a
/// message or an undecodable body is an error.
pub(crate) async fn read_message(stream: &mut TcpStream) -> io::Result<Option<Message>> {
    let mut len_bytes = [0u8; 2];
    match stream.read_exact(&mut len_bytes).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let len = usize::from(u16::from_be_bytes(len_bytes));
    let mut body = vec![0u8; len];
    stream.read_exact(&mut body).await?;

    let message = Message::from_bytes(&body)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(message))
}
