use crate::nuclio::resolve_target;
use crate::{CommandAppend, State};
use clap::{App, Arg, ArgMatches, SubCommand};
use log::debug;
use proxy::invoke::{InvokeMethod, InvokeOptions};
use schema::{InvokeVia, ResourceId};
use std::collections::HashMap;
use std::io::{Read, Write};
use utility::{Error, Result};

pub(crate) struct Invoke;

impl CommandAppend for Invoke {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        let app = app.subcommand(
            SubCommand::with_name("invoke")
                .about(
                    r#"Invokes a deployed function, reading the body from STDIN when --body is not set
	Example:
  nuclio invoke echo
  nuclio invoke echo --method post --body '{"name":"nuclio"}' --content-type application/json
  nuclio invoke echo -m post < payload.bin
  nuclio invoke echo --path /status -H X-Ping-Url=http://request.bin/etc
  nuclio invoke echo --via loadbalancer --namespace staging"#,
                )
                .args_from_usage(
                    "<NAME>                          'Name of the deployed function'
                     -m, --method [method]           'HTTP method: get, post, put, patch, delete, head or options'
                     --path [path]                   'Path inside the function, e.g. /status'
                     --via [via]                     'How the dashboard reaches the function: external-ip, loadbalancer or domain-name'
                     --content-type [content-type]   'The content-type HTTP header such as application/json'
                     --body [body]                   'Request body, STDIN is read when a post, put or patch has none'",
                )
                .arg(
                    Arg::with_name("header")
                        .long("header")
                        .short("H")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .help("Pass HTTP request header, e.g. --header X-Ping-Url=http://request.bin/etc"),
                ),
        );
        app
    }
}

impl Invoke {
    #[inline(always)]
    pub(crate) async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
        if let Some(i_args) = args.subcommand_matches("invoke") {
            let target = resolve_target(&[args, i_args]);
            let client = target.auth.get_client(target.dashboard.as_str())?;

            let name = i_args.value_of("NAME").ok_or_else(|| {
                State::Custom("you must set the function name".to_string())
            })?;
            let method: InvokeMethod = i_args
                .value_of("method")
                .unwrap_or("get")
                .to_lowercase()
                .parse()?;
            let via = match i_args.value_of("via") {
                Some(via) => Some(via.parse::<InvokeVia>()?),
                None => None,
            };

            let header_flags: Vec<&str> = i_args.values_of("header").unwrap_or_default().collect();
            let mut headers = parse_headers(&header_flags)?;
            if let Some(content_type) = i_args.value_of("content-type") {
                headers.insert("content-type".to_string(), content_type.to_string());
            }

            let body = request_body(method, i_args.value_of("body"), std::io::stdin())?;

            let options = InvokeOptions {
                method,
                body,
                headers,
                path: i_args.value_of("path").map(str::to_string),
                via,
            };
            let id = ResourceId::named(name, target.namespace.as_str());
            debug!("invoking {}.{} with {}", name, id.namespace, method);

            let result = client.invoke_function(&id, &options).await?;
            colour::e_green_ln!("> Response status: {}", result.status_code);
            if !result.body.is_empty() {
                std::io::stdout()
                    .write_all(&result.body)
                    .map_err(|e| State::Custom(e.to_string()))?;
            }

            Err(State::Matched)
        } else {
            Ok(())
        }
    }
}

/// parses repeated key=value header flags
fn parse_headers(headers: &[&str]) -> Result<HashMap<String, String>> {
    let mut header_map: HashMap<String, String> = HashMap::new();

    for header in headers {
        let header_values = header
            .splitn(2, '=')
            .map(|str| str.to_string())
            .collect::<Vec<String>>();
        if header_values.len() != 2 || header_values[0].is_empty() || header_values[1].is_empty() {
            return Err(Error::Validation(
                "the --header or -H flag must take the form of key=value".to_string(),
            ));
        }
        header_map.insert(header_values[0].clone(), header_values[1].clone());
    }

    Ok(header_map)
}

/// the body sent with the invocation. a --body flag wins, otherwise
/// methods carrying a body read it from the given input
fn request_body<R: Read>(
    method: InvokeMethod,
    flag: Option<&str>,
    mut input: R,
) -> Result<Option<Vec<u8>>> {
    if !method.carries_body() {
        return Ok(None);
    }
    if let Some(body) = flag {
        return Ok(Some(body.as_bytes().to_vec()));
    }

    let mut function_input = Vec::new();
    input.read_to_end(&mut function_input)?;
    Ok(Some(function_input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        struct TestCase {
            title: &'static str,
            input: Vec<&'static str>,
            expected: Option<Vec<(&'static str, &'static str)>>,
        }
        let cases = vec![
            TestCase {
                title: "single header",
                input: vec!["X-Ping-Url=http://request.bin/etc"],
                expected: Some(vec![("X-Ping-Url", "http://request.bin/etc")]),
            },
            TestCase {
                title: "value keeps later equal signs",
                input: vec!["X-Token=a=b", "X-Other=1"],
                expected: Some(vec![("X-Token", "a=b"), ("X-Other", "1")]),
            },
            TestCase {
                title: "missing value",
                input: vec!["X-Ping-Url="],
                expected: None,
            },
            TestCase {
                title: "missing key",
                input: vec!["=value"],
                expected: None,
            },
            TestCase {
                title: "no separator",
                input: vec!["X-Ping-Url"],
                expected: None,
            },
        ];

        for case in cases {
            let res = parse_headers(&case.input);
            match case.expected {
                Some(expected) => {
                    let headers = res.unwrap();
                    assert_eq!(headers.len(), expected.len(), "{}", case.title);
                    for (key, value) in expected {
                        assert_eq!(headers.get(key).unwrap(), value, "{}", case.title);
                    }
                }
                None => assert!(
                    matches!(res, Err(Error::Validation(_))),
                    "{}",
                    case.title
                ),
            }
        }
    }

    #[test]
    fn test_request_body_prefers_flag() {
        let stdin: &[u8] = b"from stdin";
        let body = request_body(InvokeMethod::Post, Some("from flag"), stdin).unwrap();
        assert_eq!(body.unwrap(), b"from flag".to_vec());
    }

    #[test]
    fn test_request_body_reads_input() {
        let stdin: &[u8] = b"from stdin";
        let body = request_body(InvokeMethod::Put, None, stdin).unwrap();
        assert_eq!(body.unwrap(), b"from stdin".to_vec());
    }

    #[test]
    fn test_request_body_skipped_for_get() {
        let stdin: &[u8] = b"from stdin";
        let body = request_body(InvokeMethod::Get, Some("ignored"), stdin).unwrap();
        assert!(body.is_none());
    }
}
