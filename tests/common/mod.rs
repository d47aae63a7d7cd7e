//! Test utilities and mocks for Sockscheck
//!
//! Provides a scripted loopback SOCKS5 server and a UDP relay stand-in for
//! end-to-end checks.

use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

/// Behavior script for the mock SOCKS5 server
#[derive(Debug, Clone, Copy)]
pub enum MockServer {
    /// No-auth greeting; associate succeeds pointing at the given UDP port
    NoAuth {
        /// Port of the UDP relay stand-in
        relay_port: u16,
    },
    /// Username/password demanded and accepted; associate succeeds
    PasswordAuth {
        /// Port of the UDP relay stand-in
        relay_port: u16,
    },
    /// Greeting answered with "no acceptable methods"
    RejectMethods,
    /// Associate rejected with the given reply code
    RejectAssociate {
        /// SOCKS5 reply code to send
        code: u8,
    },
}

/// Spawn a scripted SOCKS5 server for a single connection; returns its port.
pub async fn spawn_socks_server(behavior: MockServer) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        // The client may hang up early on failure paths; that is fine.
        let _ = serve(&mut stream, behavior).await;
    });

    port
}

async fn serve(stream: &mut TcpStream, behavior: MockServer) -> io::Result<()> {
    // Greeting: VER NMETHODS METHODS
    let mut head = [0u8; 2];
    stream.read_exact(&mut head).await?;
    assert_eq!(head[0], 0x05);
    let mut methods = vec![0u8; head[1] as usize];
    stream.read_exact(&mut methods).await?;

    match behavior {
        MockServer::RejectMethods => {
            stream.write_all(&[0x05, 0xFF]).await?;
            return Ok(());
        }
        MockServer::PasswordAuth { .. } => {
            stream.write_all(&[0x05, 0x02]).await?;
            read_auth(stream).await?;
        }
        _ => stream.write_all(&[0x05, 0x00]).await?,
    }

    // UDP ASSOCIATE request: VER CMD RSV ATYP DST.ADDR DST.PORT
    let mut request = [0u8; 10];
    stream.read_exact(&mut request).await?;
    assert_eq!(request[0], 0x05);
    assert_eq!(request[1], 0x03);

    match behavior {
        MockServer::NoAuth { relay_port } | MockServer::PasswordAuth { relay_port } => {
            let mut reply = vec![0x05, 0x00, 0x00, 0x01, 127, 0, 0, 1];
            reply.extend_from_slice(&relay_port.to_be_bytes());
            stream.write_all(&reply).await?;
        }
        MockServer::RejectAssociate { code } => {
            stream
                .write_all(&[0x05, code, 0x00, 0x01, 0, 0, 0, 0, 0, 0])
                .await?;
        }
        MockServer::RejectMethods => unreachable!(),
    }

    // The UDP association lives only as long as the control connection, so
    // hold it open until the client goes away.
    let mut sink = [0u8; 64];
    while stream.read(&mut sink).await? > 0 {}
    Ok(())
}

async fn read_auth(stream: &mut TcpStream) -> io::Result<()> {
    let mut head = [0u8; 2];
    stream.read_exact(&mut head).await?;
    assert_eq!(head[0], 0x01);
    let mut username = vec![0u8; head[1] as usize];
    stream.read_exact(&mut username).await?;

    let mut len = [0u8; 1];
    stream.read_exact(&mut len).await?;
    let mut password = vec![0u8; len[0] as usize];
    stream.read_exact(&mut password).await?;

    stream.write_all(&[0x01, 0x00]).await?;
    Ok(())
}

/// Spawn a UDP relay stand-in; returns its port.
///
/// When `respond` is true, the first datagram is answered with a 32-byte
/// reply; otherwise the socket stays silent.
pub async fn spawn_udp_relay(respond: bool) -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();

    tokio::spawn(async move {
        let mut buf = [0u8; 2048];
        let (_, from) = socket.recv_from(&mut buf).await.unwrap();
        if respond {
            socket.send_to(&[0u8; 32], from).await.unwrap();
        }
    });

    port
}
