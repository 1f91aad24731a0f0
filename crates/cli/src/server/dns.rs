use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use synth_dns_domain::Config;
use synth_dns_infrastructure::QueryServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Bind the four listeners and serve until every task exits. UDP and TCP
/// share one port on both address families; the v6 sockets are v6-only so
/// the pairs can coexist.
pub async fn start_listeners(config: &Config, server: QueryServer) -> anyhow::Result<()> {
    let v4_addr: SocketAddr =
        format!("{}:{}", config.server.bind_v4, config.server.port).parse()?;
    let v6_addr: SocketAddr =
        format!("[{}]:{}", config.server.bind_v6, config.server.port).parse()?;

    let udp_v4 = create_udp_socket(Domain::IPV4, v4_addr)?;
    let udp_v6 = create_udp_socket(Domain::IPV6, v6_addr)?;
    let tcp_v4 = create_tcp_listener(Domain::IPV4, v4_addr)?;
    let tcp_v6 = create_tcp_listener(Domain::IPV6, v6_addr)?;

    info!(%v4_addr, %v6_addr, "DNS listeners ready on UDP and TCP");

    let server = Arc::new(server);
    let mut join_set: JoinSet<()> = JoinSet::new();

    for socket in [udp_v4, udp_v6] {
        let server = server.clone();
        join_set.spawn(async move {
            run_udp(socket, server).await;
        });
    }

    for listener in [tcp_v4, tcp_v6] {
        let server = server.clone();
        join_set.spawn(async move {
            run_tcp(listener, server).await;
        });
    }

    while join_set.join_next().await.is_some() {}
    Ok(())
}

async fn run_udp(socket: UdpSocket, server: Arc<QueryServer>) {
    let mut buf = [0u8; 512];

    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        if let Some(response) = server.handle_datagram(&buf[..len], peer) {
            if let Err(e) = socket.send_to(&response, peer).await {
                debug!(%peer, error = %e, "Failed to send UDP response");
            }
        }
    }
}

async fn run_tcp(listener: TcpListener, server: Arc<QueryServer>) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "TCP accept error");
                continue;
            }
        };

        let server = server.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_stream(stream, peer, &server).await {
                debug!(%peer, error = %e, "TCP connection error");
            }
        });
    }
}

/// One-shot exchange: read a single length-prefixed query, write the
/// length-prefixed response, shut the stream down.
async fn serve_stream(
    mut stream: TcpStream,
    peer: SocketAddr,
    server: &QueryServer,
) -> io::Result<()> {
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;
    let len = u16::from_be_bytes(len_buf) as usize;

    let mut framed = vec![0u8; 2 + len];
    framed[..2].copy_from_slice(&len_buf);
    stream.read_exact(&mut framed[2..]).await?;

    if let Some(response) = server.handle_stream(&framed, peer) {
        stream.write_all(&response).await?;
    }
    stream.shutdown().await
}

fn create_udp_socket(domain: Domain, addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
